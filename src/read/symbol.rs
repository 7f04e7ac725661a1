//! Symbol table decoding.

use crate::elf;
use crate::read::cursor::read_cstring;
use crate::read::header::FileHeader;
use crate::read::section::Section;
use crate::read::{Annotations, Cursor, Error, Result};

/// A decoded `.symtab` entry.
#[derive(Debug)]
pub(crate) struct Symbol {
    pub(crate) name: String,
    /// Absolute file offset of the symbol's value, when the owning section
    /// is an ordinary, existing section.
    pub(crate) file_offset: Option<u64>,
}

/// Decode the symbol table, if the image has one.
///
/// A missing `.symtab` is not an error (the binary may be stripped) and
/// yields an empty list. A `.symtab` without a `.strtab` is an unrecoverable
/// inconsistency: symbol names cannot be resolved, so the whole decode
/// fails.
pub(crate) fn parse(
    cursor: &mut Cursor<'_>,
    header: &FileHeader,
    sections: &[Section],
    notes: &mut Annotations,
) -> Result<Vec<Symbol>> {
    let symtab = match sections.iter().find(|s| s.name == ".symtab") {
        Some(section) => section,
        None => return Ok(Vec::new()),
    };
    let strtab = sections
        .iter()
        .find(|s| s.name == ".strtab")
        .ok_or(Error::SymtabWithoutStrtab)?;

    let start = symtab.sh_offset;
    let each = symtab.sh_entsize;
    let count = if each == 0 { 0 } else { symtab.sh_size / each };

    let mut symbols = Vec::new();
    for i in 0..count {
        cursor.set_position(start.saturating_add(i.saturating_mul(each)));
        let symbol = if header.addr_size == 4 {
            parse32(cursor, header, sections, strtab.sh_offset, i, notes)?
        } else {
            parse64(cursor, header, sections, strtab.sh_offset, i, notes)?
        };
        symbols.push(symbol);
    }

    for (i, symbol) in symbols.iter().enumerate() {
        notes.area(
            start.saturating_add((i as u64).saturating_mul(each)),
            each,
            format!("Symbol [{}] \"{}\"", i, symbol.name),
        );
    }
    Ok(symbols)
}

fn parse32(
    cursor: &mut Cursor<'_>,
    header: &FileHeader,
    sections: &[Section],
    names_start: u64,
    i: u64,
    notes: &mut Annotations,
) -> Result<Symbol> {
    let endian = header.endian;
    let start = cursor.position();

    // Decode the raw entry first; members are emitted once the
    // cross-references are known.
    let st_name = cursor.read_int(endian, 4)?;
    let st_value = cursor.read_int(endian, 4)?;
    let st_size = cursor.read_int(endian, 4)?;
    let st_info = cursor.read_int(endian, 1)? as u8;
    let st_other = cursor.read_int(endian, 1)? as u8;
    let st_shndx = cursor.read_int(endian, 2)? as u16;

    let name_addr = names_start.saturating_add(st_name);
    let name = read_cstring(cursor.data(), name_addr);
    let file_offset = resolve_value(st_shndx, st_value, sections);

    notes.member_ref(
        start,
        4,
        format!("Symbol [{}] name offset (0x{:x}, \"{}\")", i, st_name, name),
        Some(name_addr),
        None,
    );
    notes.member_ref(
        start + 4,
        4,
        format!("Symbol [{}] value (i.e. address) = 0x{:x}", i, st_value),
        file_offset,
        None,
    );
    notes.member(start + 8, 4, format!("Symbol [{}] size (0x{:x})", i, st_size));
    notes.member(
        start + 12,
        1,
        format!(
            "Symbol [{}] info (i.e. type) (0x{:x}, {})",
            i,
            st_info,
            symbol_type_name(st_info)
        ),
    );
    notes.member(
        start + 13,
        1,
        format!(
            "Symbol [{}] other (i.e. visibility) (0x{:x}, {})",
            i,
            st_other,
            visibility_name(st_other)
        ),
    );
    notes.member(
        start + 14,
        2,
        format!(
            "Symbol [{}] corresponding section ({})",
            i,
            section_index_name(st_shndx)
        ),
    );

    Ok(Symbol { name, file_offset })
}

// The 64-bit layout moves value and size to the end so the 8-byte fields
// stay aligned.
fn parse64(
    cursor: &mut Cursor<'_>,
    header: &FileHeader,
    sections: &[Section],
    names_start: u64,
    i: u64,
    notes: &mut Annotations,
) -> Result<Symbol> {
    let endian = header.endian;
    let start = cursor.position();

    let st_name = cursor.read_int(endian, 4)?;
    let st_info = cursor.read_int(endian, 1)? as u8;
    let st_other = cursor.read_int(endian, 1)? as u8;
    let st_shndx = cursor.read_int(endian, 2)? as u16;
    let st_value = cursor.read_int(endian, 8)?;
    let st_size = cursor.read_int(endian, 8)?;

    let name_addr = names_start.saturating_add(st_name);
    let name = read_cstring(cursor.data(), name_addr);
    let file_offset = resolve_value(st_shndx, st_value, sections);

    notes.member_ref(
        start,
        4,
        format!("Symbol [{}] name offset (0x{:x}, \"{}\")", i, st_name, name),
        Some(name_addr),
        None,
    );
    notes.member(
        start + 4,
        1,
        format!(
            "Symbol [{}] info (i.e. type) (0x{:x}, {})",
            i,
            st_info,
            symbol_type_name(st_info)
        ),
    );
    notes.member(
        start + 5,
        1,
        format!(
            "Symbol [{}] other (i.e. visibility) (0x{:x}, {})",
            i,
            st_other,
            visibility_name(st_other)
        ),
    );
    notes.member(
        start + 6,
        2,
        format!(
            "Symbol [{}] corresponding section ({})",
            i,
            section_index_name(st_shndx)
        ),
    );
    notes.member_ref(
        start + 8,
        8,
        format!("Symbol [{}] value (i.e. address) = 0x{:x}", i, st_value),
        file_offset,
        None,
    );
    notes.member(start + 16, 8, format!("Symbol [{}] size (0x{:x})", i, st_size));

    Ok(Symbol { name, file_offset })
}

/// Resolve a symbol's value to an absolute file offset via its owning
/// section.
///
/// Undefined and absolute symbols designate nothing in the file; a section
/// index that does not exist resolves to nothing either.
fn resolve_value(st_shndx: u16, st_value: u64, sections: &[Section]) -> Option<u64> {
    if st_shndx == elf::SHN_UNDEF || st_shndx == elf::SHN_ABS {
        return None;
    }
    sections
        .get(usize::from(st_shndx))
        .map(|section| section.sh_offset.saturating_add(st_value))
}

fn symbol_type_name(st_info: u8) -> &'static str {
    match st_info {
        elf::STT_NOTYPE => "NOTYPE",
        elf::STT_OBJECT => "OBJECT",
        elf::STT_FUNC => "FUNC",
        elf::STT_SECTION => "SECTION",
        elf::STT_FILE => "FILE",
        elf::STT_COMMON => "COMMON",
        elf::STT_TLS => "TLS",
        elf::STT_NUM => "NUM",
        _ => "unknown",
    }
}

fn visibility_name(st_other: u8) -> &'static str {
    match st_other {
        elf::STV_DEFAULT => "DEFAULT",
        elf::STV_INTERNAL => "INTERNAL",
        elf::STV_HIDDEN => "HIDDEN",
        elf::STV_PROTECTED => "PROTECTED",
        _ => "unknown",
    }
}

fn section_index_name(st_shndx: u16) -> String {
    match st_shndx {
        elf::SHN_ABS => "ABS".to_string(),
        elf::SHN_COMMON => "COMMON".to_string(),
        elf::SHN_XINDEX => "XINDEX".to_string(),
        n if n < elf::SHN_LORESERVE => format!("[{}]", n),
        n => format!("reserved index 0x{:x}", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: &str, sh_offset: u64) -> Section {
        Section {
            name: name.to_string(),
            sh_offset,
            sh_size: 0x10,
            sh_entsize: 0,
        }
    }

    #[test]
    fn value_resolution() {
        let sections = vec![section("", 0), section(".text", 0x40)];
        assert_eq!(resolve_value(1, 4, &sections), Some(0x44));
        assert_eq!(resolve_value(elf::SHN_UNDEF, 4, &sections), None);
        assert_eq!(resolve_value(elf::SHN_ABS, 4, &sections), None);
        // Nonexistent ordinary index.
        assert_eq!(resolve_value(7, 4, &sections), None);
        // A hostile section offset saturates instead of wrapping.
        let far = vec![section("", 0), section(".text", u64::MAX)];
        assert_eq!(resolve_value(1, 4, &far), Some(u64::MAX));
    }

    #[test]
    fn classification_names() {
        assert_eq!(symbol_type_name(elf::STT_FUNC), "FUNC");
        assert_eq!(symbol_type_name(0x42), "unknown");
        assert_eq!(visibility_name(elf::STV_HIDDEN), "HIDDEN");
        assert_eq!(visibility_name(9), "unknown");
    }

    #[test]
    fn section_index_rendering() {
        assert_eq!(section_index_name(3), "[3]");
        assert_eq!(section_index_name(elf::SHN_ABS), "ABS");
        assert_eq!(section_index_name(elf::SHN_COMMON), "COMMON");
        assert_eq!(section_index_name(elf::SHN_XINDEX), "XINDEX");
        assert_eq!(section_index_name(0xff20), "reserved index 0xff20");
    }
}
