//! Relocation table decoding.

use crate::elf;
use crate::read::header::FileHeader;
use crate::read::section::Section;
use crate::read::symbol::Symbol;
use crate::read::{Annotations, Cursor, Result};

/// Width in bytes of the highlighted patch range at a relocation's target,
/// matching the usual in-place patch width on the covered architectures.
const TARGET_WIDTH: u64 = 4;

/// Decode relocation tables for each affected section.
///
/// For every name in `affected` that resolves to a section, the companion
/// `.rel<name>` (implicit addend) and `.rela<name>` (explicit addend) tables
/// are decoded when present; either, both, or neither may exist.
pub(crate) fn parse(
    cursor: &mut Cursor<'_>,
    header: &FileHeader,
    sections: &[Section],
    symbols: &[Symbol],
    affected: &[&str],
    notes: &mut Annotations,
) -> Result<()> {
    for name in affected {
        let target = match sections.iter().find(|s| &s.name == name) {
            Some(section) => section,
            None => continue,
        };
        for &(prefix, explicit_addend) in &[(".rel", false), (".rela", true)] {
            let table_name = format!("{}{}", prefix, name);
            let table = match sections.iter().find(|s| s.name == table_name) {
                Some(section) => section,
                None => continue,
            };
            parse_table(cursor, header, target, table, symbols, explicit_addend, notes)?;
        }
    }
    Ok(())
}

fn parse_table(
    cursor: &mut Cursor<'_>,
    header: &FileHeader,
    target: &Section,
    table: &Section,
    symbols: &[Symbol],
    explicit_addend: bool,
    notes: &mut Annotations,
) -> Result<()> {
    let start = table.sh_offset;
    let each = table.sh_entsize;
    let count = if each == 0 { 0 } else { table.sh_size / each };
    let endian = header.endian;
    let width = header.addr_size as u64;

    for i in 0..count {
        let slot = start.saturating_add(i.saturating_mul(each));
        notes.area(slot, each, format!("Relocation [{}] in \"{}\"", i, table.name));
        cursor.set_position(slot);
        let entry = cursor.position();

        let r_offset = cursor.read_int(endian, header.addr_size)?;
        let r_info = cursor.read_int(endian, header.addr_size)?;
        // The packed info field splits differently per width; the 64-bit
        // encoding needs the full widened value to avoid overflow.
        let (r_sym, r_type) = if header.addr_size == 4 {
            (r_info >> 8, (r_info & 0xff) as u32)
        } else {
            (r_info >> 32, (r_info & 0xffff_ffff) as u32)
        };
        let r_addend = if explicit_addend {
            let raw = cursor.read_int(endian, header.addr_size)?;
            Some(sign_extend(raw, header.addr_size))
        } else {
            None
        };

        // Absolute file address of the patched bytes.
        let target_offset = target.sh_offset.saturating_add(r_offset);
        // Where the referenced symbol (+ addend) lives in the file.
        let symbol_offset = symbols
            .get(r_sym as usize)
            .and_then(|symbol| symbol.file_offset)
            .map(|offset| (offset as i64).wrapping_add(r_addend.unwrap_or(0)) as u64);

        notes.member_ref(
            entry,
            width,
            format!("Relocation [{}] offset in \"{}\" (0x{:x})", i, target.name, r_offset),
            Some(target_offset),
            None,
        );
        notes.member_ref(
            entry + width,
            width,
            format!(
                "Relocation [{}] symbol [{}], type ({})",
                i,
                r_sym,
                relocation_type_name(header.e_machine, r_type)
            ),
            symbol_offset,
            None,
        );
        if let Some(addend) = r_addend {
            notes.member(
                entry + 2 * width,
                width,
                format!("Relocation [{}] addend ({})", i, addend),
            );
        }

        notes.area(
            target_offset,
            TARGET_WIDTH,
            format!("Relocation [{}] target", i),
        );
    }
    Ok(())
}

fn sign_extend(raw: u64, size: usize) -> i64 {
    if size == 4 {
        i64::from(raw as u32 as i32)
    } else {
        raw as i64
    }
}

/// Render a relocation type code for the given architecture.
///
/// Unrecognized codes within a known architecture render as "unknown"; an
/// architecture without a mnemonic table renders a placeholder naming the
/// unresolved code.
pub(crate) fn relocation_type_name(e_machine: u16, r_type: u32) -> String {
    match e_machine {
        elf::EM_386 => x86_relocation_name(r_type).to_string(),
        elf::EM_X86_64 => amd64_relocation_name(r_type).to_string(),
        _ => format!("reloc type {} (arch 0x{:x})", r_type, e_machine),
    }
}

fn x86_relocation_name(r_type: u32) -> &'static str {
    match r_type {
        elf::R_386_NONE => "R_386_NONE",
        elf::R_386_32 => "R_386_32",
        elf::R_386_PC32 => "R_386_PC32",
        elf::R_386_GOT32 => "R_386_GOT32",
        elf::R_386_PLT32 => "R_386_PLT32",
        elf::R_386_COPY => "R_386_COPY",
        elf::R_386_GLOB_DAT => "R_386_GLOB_DAT",
        elf::R_386_JMP_SLOT => "R_386_JMP_SLOT",
        elf::R_386_RELATIVE => "R_386_RELATIVE",
        elf::R_386_GOTOFF => "R_386_GOTOFF",
        elf::R_386_GOTPC => "R_386_GOTPC",
        _ => "unknown",
    }
}

fn amd64_relocation_name(r_type: u32) -> &'static str {
    match r_type {
        elf::R_X86_64_NONE => "R_X86_64_NONE",
        elf::R_X86_64_64 => "R_X86_64_64",
        elf::R_X86_64_PC32 => "R_X86_64_PC32",
        elf::R_X86_64_GOT32 => "R_X86_64_GOT32",
        elf::R_X86_64_PLT32 => "R_X86_64_PLT32",
        elf::R_X86_64_COPY => "R_X86_64_COPY",
        elf::R_X86_64_GLOB_DAT => "R_X86_64_GLOB_DAT",
        elf::R_X86_64_JUMP_SLOT => "R_X86_64_JUMP_SLOT",
        elf::R_X86_64_RELATIVE => "R_X86_64_RELATIVE",
        elf::R_X86_64_GOTPCREL => "R_X86_64_GOTPCREL",
        elf::R_X86_64_32 => "R_X86_64_32",
        elf::R_X86_64_32S => "R_X86_64_32S",
        elf::R_X86_64_16 => "R_X86_64_16",
        elf::R_X86_64_PC16 => "R_X86_64_PC16",
        elf::R_X86_64_8 => "R_X86_64_8",
        elf::R_X86_64_PC8 => "R_X86_64_PC8",
        elf::R_X86_64_DTPMOD64 => "R_X86_64_DTPMOD64",
        elf::R_X86_64_DTPOFF64 => "R_X86_64_DTPOFF64",
        elf::R_X86_64_TPOFF64 => "R_X86_64_TPOFF64",
        elf::R_X86_64_TLSGD => "R_X86_64_TLSGD",
        elf::R_X86_64_TLSLD => "R_X86_64_TLSLD",
        elf::R_X86_64_DTPOFF32 => "R_X86_64_DTPOFF32",
        elf::R_X86_64_GOTTPOFF => "R_X86_64_GOTTPOFF",
        elf::R_X86_64_TPOFF32 => "R_X86_64_TPOFF32",
        elf::R_X86_64_PC64 => "R_X86_64_PC64",
        elf::R_X86_64_GOTOFF64 => "R_X86_64_GOTOFF64",
        elf::R_X86_64_GOTPC32 => "R_X86_64_GOTPC32",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amd64_mnemonics() {
        assert_eq!(relocation_type_name(elf::EM_X86_64, 1), "R_X86_64_64");
        assert_eq!(relocation_type_name(elf::EM_X86_64, 0), "R_X86_64_NONE");
        assert_eq!(relocation_type_name(elf::EM_X86_64, 999), "unknown");
    }

    #[test]
    fn x86_mnemonics() {
        assert_eq!(relocation_type_name(elf::EM_386, 2), "R_386_PC32");
        assert_eq!(relocation_type_name(elf::EM_386, 200), "unknown");
    }

    #[test]
    fn fallback_names_the_architecture() {
        assert_eq!(
            relocation_type_name(elf::EM_ARM, 3),
            "reloc type 3 (arch 0x28)"
        );
    }

    #[test]
    fn addend_sign_extension() {
        assert_eq!(sign_extend(0xffff_fffc, 4), -4);
        assert_eq!(sign_extend(0x10, 4), 16);
        assert_eq!(sign_extend(u64::MAX, 8), -1);
    }
}
