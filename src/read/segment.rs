//! Program header (segment) table decoding.

use crate::elf;
use crate::read::header::FileHeader;
use crate::read::{Annotations, Cursor, Result};

/// A decoded program header.
#[derive(Debug)]
pub(crate) struct Segment {
    pub(crate) p_offset: u64,
    pub(crate) p_filesz: u64,
}

/// Decode the program header array.
///
/// Emits one area per raw header slot, the per-field members for every
/// entry, and one contents area per file-backed segment. A segment whose
/// file offset is zero has no file backing by convention and gets no
/// contents area.
pub(crate) fn parse(
    cursor: &mut Cursor<'_>,
    header: &FileHeader,
    notes: &mut Annotations,
) -> Result<Vec<Segment>> {
    let start = header.e_phoff;
    let each = u64::from(header.e_phentsize);
    let count = u64::from(header.e_phnum);

    for i in 0..count {
        notes.area(start.saturating_add(i * each), each, format!("Segment [{}] header", i));
    }

    let mut segments = Vec::new();
    if each == 0 || count == 0 {
        return Ok(segments);
    }
    for i in 0..count {
        cursor.set_position(start.saturating_add(i * each));
        let segment = if header.addr_size == 4 {
            parse32(cursor, header, i, notes)?
        } else {
            parse64(cursor, header, i, notes)?
        };
        segments.push(segment);
    }

    for (i, segment) in segments.iter().enumerate() {
        if segment.p_offset != 0 {
            notes.area(segment.p_offset, segment.p_filesz, format!("Segment [{}]", i));
        }
    }
    Ok(segments)
}

fn parse32(
    cursor: &mut Cursor<'_>,
    header: &FileHeader,
    i: u64,
    notes: &mut Annotations,
) -> Result<Segment> {
    let endian = header.endian;

    let p_type = cursor.read_int(endian, 4)? as u32;
    notes.field(
        cursor,
        4,
        format!("Segment [{}] type ({}: {})", i, p_type, segment_type_name(p_type)),
    );
    let p_offset = cursor.read_int(endian, 4)?;
    notes.field_ref(
        cursor,
        4,
        format!("Segment [{}] offset in file", i),
        Some(p_offset),
        None,
    );
    let p_vaddr = cursor.read_int(endian, 4)?;
    notes.field_ref(
        cursor,
        4,
        format!("Segment [{}] (virtual) memory location", i),
        None,
        Some(p_vaddr),
    );
    let p_paddr = cursor.read_int(endian, 4)?;
    notes.field_ref(
        cursor,
        4,
        format!("Segment [{}] (physical) memory location", i),
        None,
        Some(p_paddr),
    );
    let p_filesz = cursor.read_int(endian, 4)?;
    notes.field(cursor, 4, format!("Segment [{}] size in file (0x{:x})", i, p_filesz));
    let p_memsz = cursor.read_int(endian, 4)?;
    notes.field(cursor, 4, format!("Segment [{}] size in memory (0x{:x})", i, p_memsz));
    let p_flags = cursor.read_int(endian, 4)? as u32;
    notes.field(
        cursor,
        4,
        format!("Segment [{}] flags (0x{:x}: {})", i, p_flags, segment_flags(p_flags)),
    );
    let p_align = cursor.read_int(endian, 4)?;
    notes.field(
        cursor,
        4,
        format!("Segment [{}] memory alignment (0x{:x})", i, p_align),
    );

    Ok(Segment { p_offset, p_filesz })
}

// The 64-bit layout moves the flags field up next to the type so the
// following address fields stay 8-byte aligned.
fn parse64(
    cursor: &mut Cursor<'_>,
    header: &FileHeader,
    i: u64,
    notes: &mut Annotations,
) -> Result<Segment> {
    let endian = header.endian;

    let p_type = cursor.read_int(endian, 4)? as u32;
    notes.field(
        cursor,
        4,
        format!("Segment [{}] type ({}: {})", i, p_type, segment_type_name(p_type)),
    );
    let p_flags = cursor.read_int(endian, 4)? as u32;
    notes.field(
        cursor,
        4,
        format!("Segment [{}] flags (0x{:x}: {})", i, p_flags, segment_flags(p_flags)),
    );
    let p_offset = cursor.read_int(endian, 8)?;
    notes.field_ref(
        cursor,
        8,
        format!("Segment [{}] offset in file", i),
        Some(p_offset),
        None,
    );
    let p_vaddr = cursor.read_int(endian, 8)?;
    notes.field_ref(
        cursor,
        8,
        format!("Segment [{}] (virtual) memory location", i),
        None,
        Some(p_vaddr),
    );
    let p_paddr = cursor.read_int(endian, 8)?;
    notes.field_ref(
        cursor,
        8,
        format!("Segment [{}] (physical) memory location", i),
        None,
        Some(p_paddr),
    );
    let p_filesz = cursor.read_int(endian, 8)?;
    notes.field(cursor, 8, format!("Segment [{}] size in file (0x{:x})", i, p_filesz));
    let p_memsz = cursor.read_int(endian, 8)?;
    notes.field(cursor, 8, format!("Segment [{}] size in memory (0x{:x})", i, p_memsz));
    let p_align = cursor.read_int(endian, 8)?;
    notes.field(
        cursor,
        8,
        format!("Segment [{}] memory alignment (0x{:x})", i, p_align),
    );

    Ok(Segment { p_offset, p_filesz })
}

fn segment_type_name(p_type: u32) -> &'static str {
    match p_type {
        elf::PT_NULL => "null",
        elf::PT_LOAD => "load",
        elf::PT_DYNAMIC => "dynamic",
        elf::PT_INTERP => "interp",
        elf::PT_NOTE => "note",
        elf::PT_SHLIB => "shlib (invalid)",
        elf::PT_PHDR => "program header",
        elf::PT_TLS => "TLS - thread local storage",
        _ => "unknown",
    }
}

fn segment_flags(p_flags: u32) -> String {
    if p_flags == 0 {
        return "none".to_string();
    }
    let mut flags = Vec::new();
    if p_flags & elf::PF_X != 0 {
        flags.push("exec");
    }
    if p_flags & elf::PF_W != 0 {
        flags.push("write");
    }
    if p_flags & elf::PF_R != 0 {
        flags.push("read");
    }
    if p_flags & !(elf::PF_X | elf::PF_W | elf::PF_R) != 0 {
        flags.push("unknown");
    }
    flags.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names() {
        assert_eq!(segment_type_name(elf::PT_LOAD), "load");
        assert_eq!(segment_type_name(elf::PT_SHLIB), "shlib (invalid)");
        assert_eq!(segment_type_name(0x6474_e550), "unknown");
    }

    #[test]
    fn flag_rendering() {
        assert_eq!(segment_flags(0), "none");
        assert_eq!(segment_flags(elf::PF_R | elf::PF_X), "exec|read");
        assert_eq!(segment_flags(elf::PF_W | 0x10), "write|unknown");
    }
}
