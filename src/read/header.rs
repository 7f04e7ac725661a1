//! ELF header decoding.

use crate::elf;
use crate::endian::Endianness;
use crate::read::{Annotations, Cursor, Error, Result};

/// The decoded ELF file header.
///
/// Built once by [`parse`] and read-only afterwards; every later decoder
/// recomputes its own table start from these fields.
#[derive(Debug)]
pub(crate) struct FileHeader {
    /// Detected byte order.
    pub(crate) endian: Endianness,
    /// Width in bytes of address-typed fields: 4 (32-bit) or 8 (64-bit).
    pub(crate) addr_size: usize,
    pub(crate) e_machine: u16,
    pub(crate) e_phoff: u64,
    pub(crate) e_shoff: u64,
    pub(crate) e_phentsize: u16,
    pub(crate) e_phnum: u16,
    pub(crate) e_shentsize: u16,
    pub(crate) e_shnum: u16,
    /// File offset of the section-name string table's data, read ahead of
    /// the section table decode so section names can be resolved.
    pub(crate) shstrtab_offset: u64,
}

/// Decode the fixed header at the start of the image.
///
/// Validates the identification bytes, detects register size and byte order,
/// then decodes the remaining header fields with the detected parameters.
/// Validation failures abort the decode; no members are kept for an image
/// that fails the magic check.
pub(crate) fn parse(cursor: &mut Cursor<'_>, notes: &mut Annotations) -> Result<FileHeader> {
    let magic = cursor.read_bytes(4).map_err(|_| Error::NotElf)?;
    if magic != &elf::ELFMAG[..] {
        return Err(Error::NotElf);
    }
    notes.member(0, 4, "ELF magic number".to_string());
    // Bytes 9..16 of the identification block are reserved zeros; surface
    // them right away so the hex view has no unexplained hole.
    notes.member(9, 7, "Padding (zeros)".to_string());

    let offset = cursor.position();
    let addr_size = match cursor.read_bytes(1)?[0] {
        elf::ELFCLASS32 => 4,
        elf::ELFCLASS64 => 8,
        value => return Err(Error::InvalidClass { offset, value }),
    };
    notes.member(offset, 1, format!("Register size ({}-bit)", addr_size * 8));

    let offset = cursor.position();
    let endian = match cursor.read_bytes(1)?[0] {
        elf::ELFDATA2LSB => Endianness::Little,
        elf::ELFDATA2MSB => Endianness::Big,
        value => return Err(Error::InvalidEndianness { offset, value }),
    };
    notes.member(offset, 1, format!("Endianness ({})", endian));

    let offset = cursor.position();
    match cursor.read_bytes(1)?[0] {
        elf::EV_CURRENT => {}
        value => return Err(Error::InvalidVersion { offset, value }),
    }
    notes.member(offset, 1, "ELF version (0x01)".to_string());

    let offset = cursor.position();
    match cursor.read_bytes(1)?[0] {
        elf::ELFOSABI_NONE => {}
        value => return Err(Error::InvalidAbiType { offset, value }),
    }
    notes.member(offset, 1, "ELF ABI type (0x00)".to_string());

    let offset = cursor.position();
    match cursor.read_bytes(1)?[0] {
        0 => {}
        value => return Err(Error::InvalidAbiVersion { offset, value }),
    }
    notes.member(offset, 1, "ELF ABI version (00)".to_string());

    // Skip the reserved tail of the identification block.
    cursor.set_position(elf::EI_NIDENT);

    let e_type = cursor.read_int(endian, 2)? as u16;
    notes.field(cursor, 2, format!("Type ({})", file_type_name(e_type)));
    let e_machine = cursor.read_int(endian, 2)? as u16;
    notes.field(cursor, 2, format!("Architecture ({})", machine_name(e_machine)));
    let e_version = cursor.read_int(endian, 4)? as u32;
    notes.field(cursor, 4, format!("ELF version (0x{:x})", e_version));

    let width = addr_size as u64;
    let e_entry = cursor.read_int(endian, addr_size)?;
    notes.field_ref(cursor, width, "Entry point".to_string(), None, Some(e_entry));
    let e_phoff = cursor.read_int(endian, addr_size)?;
    notes.field_ref(
        cursor,
        width,
        "Segment headers start".to_string(),
        Some(e_phoff),
        None,
    );
    let e_shoff = cursor.read_int(endian, addr_size)?;
    notes.field_ref(
        cursor,
        width,
        "Section headers start".to_string(),
        Some(e_shoff),
        None,
    );

    let e_flags = cursor.read_int(endian, 4)? as u32;
    notes.field(cursor, 4, format!("ELF flags (0x{:x})", e_flags));
    let e_ehsize = cursor.read_int(endian, 2)? as u16;
    notes.field_ref(
        cursor,
        2,
        "ELF header size".to_string(),
        Some(u64::from(e_ehsize)),
        None,
    );
    let e_phentsize = cursor.read_int(endian, 2)? as u16;
    notes.field(
        cursor,
        2,
        format!("Size of each segment header ({})", e_phentsize),
    );
    let e_phnum = cursor.read_int(endian, 2)? as u16;
    notes.field(cursor, 2, format!("Number of segments ({})", e_phnum));
    let e_shentsize = cursor.read_int(endian, 2)? as u16;
    notes.field(
        cursor,
        2,
        format!("Size of each section header ({})", e_shentsize),
    );
    let e_shnum = cursor.read_int(endian, 2)? as u16;
    notes.field(cursor, 2, format!("Number of sections ({})", e_shnum));
    let e_shstrndx = cursor.read_int(endian, 2)? as u16;
    notes.field_ref(
        cursor,
        2,
        format!("Section header strings index ({})", e_shstrndx),
        Some(e_shoff.saturating_add(u64::from(e_shstrndx) * u64::from(e_shentsize))),
        None,
    );

    // Unlike the identification checks, this one runs after the field was
    // already emitted.
    if e_version != u32::from(elf::EV_CURRENT) {
        return Err(Error::InvalidFormatVersion { value: e_version });
    }

    notes.area(0, u64::from(e_ehsize), "ELF header".to_string());

    let shstrtab_offset = shstrtab_data_offset(
        cursor.data(),
        endian,
        addr_size,
        e_shoff,
        e_shentsize,
        e_shstrndx,
    )?;

    Ok(FileHeader {
        endian,
        addr_size,
        e_machine,
        e_phoff,
        e_shoff,
        e_phentsize,
        e_phnum,
        e_shentsize,
        e_shnum,
        shstrtab_offset,
    })
}

/// Bootstrap read of the section-name string table's data offset.
///
/// Section names live in the section named by `e_shstrndx`, but resolving
/// any name requires that section's own file offset first. Read the
/// `sh_offset` field straight out of its header record (at `+16` in the
/// 32-bit layout, `+24` in the 64-bit layout), with an independent cursor so
/// the main decode position is untouched.
fn shstrtab_data_offset(
    data: &[u8],
    endian: Endianness,
    addr_size: usize,
    e_shoff: u64,
    e_shentsize: u16,
    e_shstrndx: u16,
) -> Result<u64> {
    let header_offset = e_shoff.saturating_add(u64::from(e_shstrndx) * u64::from(e_shentsize));
    let (field_offset, field_size) = if addr_size == 4 { (16, 4) } else { (24, 8) };
    let mut cursor = Cursor::new(data);
    cursor.set_position(header_offset.saturating_add(field_offset));
    cursor.read_int(endian, field_size)
}

fn file_type_name(e_type: u16) -> &'static str {
    match e_type {
        elf::ET_NONE => "None",
        elf::ET_REL => "Relocatable",
        elf::ET_EXEC => "Executable",
        elf::ET_DYN => "Shared object",
        elf::ET_CORE => "Core",
        _ => "Unknown",
    }
}

fn machine_name(e_machine: u16) -> &'static str {
    match e_machine {
        elf::EM_386 => "x86",
        elf::EM_MIPS => "MIPS",
        elf::EM_ARM => "ARM",
        elf::EM_X86_64 => "amd64",
        elf::EM_AARCH64 => "ARMv8",
        elf::EM_RISCV => "RISC-V",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names() {
        assert_eq!(file_type_name(elf::ET_REL), "Relocatable");
        assert_eq!(file_type_name(elf::ET_DYN), "Shared object");
        assert_eq!(file_type_name(0x1234), "Unknown");
    }

    #[test]
    fn machine_names() {
        assert_eq!(machine_name(elf::EM_X86_64), "amd64");
        assert_eq!(machine_name(elf::EM_RISCV), "RISC-V");
        assert_eq!(machine_name(0x1234), "Unknown");
    }
}
