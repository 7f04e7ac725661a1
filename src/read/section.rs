//! Section header table decoding.

use crate::elf;
use crate::read::cursor::read_cstring;
use crate::read::header::FileHeader;
use crate::read::{Annotations, Cursor, Result};

/// A decoded section header, with its name already resolved.
#[derive(Debug)]
pub(crate) struct Section {
    pub(crate) name: String,
    pub(crate) sh_offset: u64,
    pub(crate) sh_size: u64,
    pub(crate) sh_entsize: u64,
}

/// Decode the section header array.
///
/// Each entry's name field is an offset into the section-name string table;
/// the resolved string is attached immediately. Emits one area per raw
/// header slot and one contents area per section with a non-zero file
/// offset.
pub(crate) fn parse(
    cursor: &mut Cursor<'_>,
    header: &FileHeader,
    notes: &mut Annotations,
) -> Result<Vec<Section>> {
    let start = header.e_shoff;
    let each = u64::from(header.e_shentsize);
    let count = u64::from(header.e_shnum);

    for i in 0..count {
        notes.area(start.saturating_add(i * each), each, format!("Section [{}] header", i));
    }

    let mut sections = Vec::new();
    if each == 0 || count == 0 {
        return Ok(sections);
    }
    for i in 0..count {
        cursor.set_position(start.saturating_add(i * each));
        let section = if header.addr_size == 4 {
            parse32(cursor, header, i, notes)?
        } else {
            parse64(cursor, header, i, notes)?
        };
        sections.push(section);
    }

    for (i, section) in sections.iter().enumerate() {
        if section.sh_offset != 0 {
            notes.area(
                section.sh_offset,
                section.sh_size,
                format!("Section [{}] \"{}\"", i, section.name),
            );
        }
    }
    Ok(sections)
}

fn parse32(
    cursor: &mut Cursor<'_>,
    header: &FileHeader,
    i: u64,
    notes: &mut Annotations,
) -> Result<Section> {
    let endian = header.endian;
    let names_start = header.shstrtab_offset;

    let sh_name = cursor.read_int(endian, 4)?;
    let name_addr = names_start.saturating_add(sh_name);
    let name = read_cstring(cursor.data(), name_addr);
    notes.field_ref(
        cursor,
        4,
        format!("Section [{}] name offset (0x{:x}, \"{}\")", i, sh_name, name),
        Some(name_addr),
        None,
    );
    let sh_type = cursor.read_int(endian, 4)? as u32;
    notes.field(
        cursor,
        4,
        format!("Section [{}] type ({}: {})", i, sh_type, section_type_name(sh_type)),
    );
    let sh_flags = cursor.read_int(endian, 4)?;
    notes.field(
        cursor,
        4,
        format!("Section [{}] flags ({}): {}", i, sh_flags, section_flags(sh_flags)),
    );
    let sh_addr = cursor.read_int(endian, 4)?;
    notes.field_ref(
        cursor,
        4,
        format!("Section [{}] address", i),
        None,
        Some(sh_addr),
    );
    let sh_offset = cursor.read_int(endian, 4)?;
    notes.field_ref(
        cursor,
        4,
        format!("Section [{}] offset in file", i),
        Some(sh_offset),
        None,
    );
    let sh_size = cursor.read_int(endian, 4)?;
    notes.field(cursor, 4, format!("Section [{}] size (0x{:x})", i, sh_size));
    let sh_link = cursor.read_int(endian, 4)?;
    notes.field(cursor, 4, format!("Section [{}] link (0x{:x})", i, sh_link));
    let sh_info = cursor.read_int(endian, 4)?;
    notes.field(cursor, 4, format!("Section [{}] info (0x{:x})", i, sh_info));
    let sh_addralign = cursor.read_int(endian, 4)?;
    notes.field(
        cursor,
        4,
        format!("Section [{}] memory alignment (0x{:x})", i, sh_addralign),
    );
    let sh_entsize = cursor.read_int(endian, 4)?;
    notes.field(
        cursor,
        4,
        format!("Section [{}] entry size (0x{:x})", i, sh_entsize),
    );

    Ok(Section {
        name,
        sh_offset,
        sh_size,
        sh_entsize,
    })
}

// Identical field order to the 32-bit layout; only the flags field widens to
// the full address size.
fn parse64(
    cursor: &mut Cursor<'_>,
    header: &FileHeader,
    i: u64,
    notes: &mut Annotations,
) -> Result<Section> {
    let endian = header.endian;
    let names_start = header.shstrtab_offset;

    let sh_name = cursor.read_int(endian, 4)?;
    let name_addr = names_start.saturating_add(sh_name);
    let name = read_cstring(cursor.data(), name_addr);
    notes.field_ref(
        cursor,
        4,
        format!("Section [{}] name offset (0x{:x}, \"{}\")", i, sh_name, name),
        Some(name_addr),
        None,
    );
    let sh_type = cursor.read_int(endian, 4)? as u32;
    notes.field(
        cursor,
        4,
        format!("Section [{}] type ({}: {})", i, sh_type, section_type_name(sh_type)),
    );
    let sh_flags = cursor.read_int(endian, 8)?;
    notes.field(
        cursor,
        8,
        format!("Section [{}] flags ({}): {}", i, sh_flags, section_flags(sh_flags)),
    );
    let sh_addr = cursor.read_int(endian, 8)?;
    notes.field_ref(
        cursor,
        8,
        format!("Section [{}] address", i),
        None,
        Some(sh_addr),
    );
    let sh_offset = cursor.read_int(endian, 8)?;
    notes.field_ref(
        cursor,
        8,
        format!("Section [{}] offset in file", i),
        Some(sh_offset),
        None,
    );
    let sh_size = cursor.read_int(endian, 8)?;
    notes.field(cursor, 8, format!("Section [{}] size (0x{:x})", i, sh_size));
    let sh_link = cursor.read_int(endian, 4)?;
    notes.field(cursor, 4, format!("Section [{}] link (0x{:x})", i, sh_link));
    let sh_info = cursor.read_int(endian, 4)?;
    notes.field(cursor, 4, format!("Section [{}] info (0x{:x})", i, sh_info));
    let sh_addralign = cursor.read_int(endian, 8)?;
    notes.field(
        cursor,
        8,
        format!("Section [{}] memory alignment (0x{:x})", i, sh_addralign),
    );
    let sh_entsize = cursor.read_int(endian, 8)?;
    notes.field(
        cursor,
        8,
        format!("Section [{}] entry size (0x{:x})", i, sh_entsize),
    );

    Ok(Section {
        name,
        sh_offset,
        sh_size,
        sh_entsize,
    })
}

fn section_type_name(sh_type: u32) -> &'static str {
    match sh_type {
        elf::SHT_NULL => "null",
        elf::SHT_PROGBITS => "progbits",
        elf::SHT_SYMTAB => "symbol table",
        elf::SHT_STRTAB => "string table",
        elf::SHT_RELA => "rela",
        elf::SHT_HASH => "hash",
        elf::SHT_DYNAMIC => "dynamic",
        elf::SHT_NOTE => "note",
        elf::SHT_NOBITS => "nobits",
        elf::SHT_REL => "rel",
        elf::SHT_SHLIB => "shlib",
        elf::SHT_DYNSYM => "dynsym",
        _ => "unknown",
    }
}

fn section_flags(sh_flags: u64) -> String {
    if sh_flags == 0 {
        return "none".to_string();
    }
    let mut flags = Vec::new();
    if sh_flags & elf::SHF_WRITE != 0 {
        flags.push("write");
    }
    if sh_flags & elf::SHF_ALLOC != 0 {
        flags.push("alloc");
    }
    if sh_flags & elf::SHF_EXECINSTR != 0 {
        flags.push("execinstr");
    }
    if sh_flags & !(elf::SHF_WRITE | elf::SHF_ALLOC | elf::SHF_EXECINSTR) != 0 {
        flags.push("unknown");
    }
    flags.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names() {
        assert_eq!(section_type_name(elf::SHT_SYMTAB), "symbol table");
        assert_eq!(section_type_name(elf::SHT_DYNSYM), "dynsym");
        assert_eq!(section_type_name(0x7000_0000), "unknown");
    }

    #[test]
    fn flag_rendering() {
        assert_eq!(section_flags(0), "none");
        assert_eq!(
            section_flags(elf::SHF_ALLOC | elf::SHF_EXECINSTR),
            "alloc|execinstr"
        );
        assert_eq!(section_flags(elf::SHF_WRITE | 0x40), "write|unknown");
    }
}
