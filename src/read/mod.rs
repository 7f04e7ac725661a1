//! The ELF annotation decoder.
//!
//! [`parse`] walks one ELF image and produces an [`Annotations`] value: a
//! flat, ordered list of labeled field descriptions ([`Member`]) plus a list
//! of named, possibly overlapping byte ranges ([`Area`]). The decode is a
//! pure function of the input bytes; it performs no I/O and keeps no state
//! across calls.

use std::error;
use std::fmt;

mod cursor;
pub(crate) use cursor::Cursor;

mod header;
mod relocation;
mod section;
mod segment;
mod symbol;

/// Section names whose relocation tables are decoded by [`parse`].
pub const DEFAULT_AFFECTED: &[&str] = &[".text"];

/// The result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for an ELF decode.
///
/// Structural validation failures carry the byte offset of the check that
/// failed. [`Error::SymtabWithoutStrtab`] is the one cross-table
/// inconsistency: a `.symtab` section with no `.strtab` leaves symbol names
/// unresolvable, so no recovery is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The image does not start with the ELF magic bytes.
    NotElf,
    /// The class identification byte is neither 32-bit nor 64-bit.
    InvalidClass {
        /// Offset of the class byte.
        offset: u64,
        /// The unrecognized value.
        value: u8,
    },
    /// The data identification byte is neither little- nor big-endian.
    InvalidEndianness {
        /// Offset of the data byte.
        offset: u64,
        /// The unrecognized value.
        value: u8,
    },
    /// The version identification byte is not 1.
    InvalidVersion {
        /// Offset of the version byte.
        offset: u64,
        /// The unexpected value.
        value: u8,
    },
    /// The OS ABI identification byte is not 0.
    InvalidAbiType {
        /// Offset of the OS ABI byte.
        offset: u64,
        /// The unexpected value.
        value: u8,
    },
    /// The ABI version identification byte is not 0.
    InvalidAbiVersion {
        /// Offset of the ABI version byte.
        offset: u64,
        /// The unexpected value.
        value: u8,
    },
    /// The header's format version field is not 1.
    InvalidFormatVersion {
        /// The unexpected value.
        value: u32,
    },
    /// An integer read was requested with a width other than 1, 2, 4, or 8.
    InvalidReadSize {
        /// The rejected width.
        size: usize,
    },
    /// A read ran past the end of the buffer.
    UnexpectedEof {
        /// Offset at which the read started.
        offset: u64,
    },
    /// The image has a `.symtab` section but no `.strtab` section.
    SymtabWithoutStrtab,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::NotElf => f.write_str("Not an ELF file"),
            Error::InvalidClass { offset, value } => {
                write!(f, "Invalid register size value {:#x} at {:#x}", value, offset)
            }
            Error::InvalidEndianness { offset, value } => {
                write!(f, "Invalid endianness value {:#x} at {:#x}", value, offset)
            }
            Error::InvalidVersion { offset, value } => {
                write!(f, "Invalid ELF version {}, expected 1 at {:#x}", value, offset)
            }
            Error::InvalidAbiType { offset, value } => {
                write!(f, "Invalid ABI type {}, expected 0 at {:#x}", value, offset)
            }
            Error::InvalidAbiVersion { offset, value } => {
                write!(f, "Invalid ABI version {}, expected 0 at {:#x}", value, offset)
            }
            Error::InvalidFormatVersion { value } => {
                write!(f, "ELF version is {} when 1 was expected", value)
            }
            Error::InvalidReadSize { size } => {
                write!(f, "Expected 1, 2, 4, or 8 as read size but got {}", size)
            }
            Error::UnexpectedEof { offset } => {
                write!(f, "Unexpected end of file at {:#x}", offset)
            }
            Error::SymtabWithoutStrtab => {
                f.write_str("Have .symtab but no .strtab to resolve symbols' names")
            }
        }
    }
}

impl error::Error for Error {}

/// One decoded field: a labeled byte range with optional cross-references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// File offset of the first byte of the field.
    pub address: u64,
    /// Number of bytes the field occupies.
    pub length: u64,
    /// Human-readable description of the field.
    pub label: String,
    /// File offset this field's value designates, if any.
    pub file_ref: Option<u64>,
    /// Virtual address this field's value designates, if any.
    pub mem_ref: Option<u64>,
}

/// A named byte range used for region-level highlighting.
///
/// Areas may overlap; a segment's contents and a section's contents commonly
/// cover the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    /// File offset of the first byte of the range.
    pub offset: u64,
    /// Number of bytes in the range.
    pub length: u64,
    /// Human-readable description of the range.
    pub label: String,
}

/// The annotation model produced by one decode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Annotations {
    /// Decoded fields, in the order they were read.
    pub members: Vec<Member>,
    /// Named byte ranges.
    pub areas: Vec<Area>,
}

impl Annotations {
    /// Record a member at an explicit address, without cross-references.
    pub(crate) fn member(&mut self, address: u64, length: u64, label: String) {
        self.member_ref(address, length, label, None, None);
    }

    /// Record a member at an explicit address.
    pub(crate) fn member_ref(
        &mut self,
        address: u64,
        length: u64,
        label: String,
        file_ref: Option<u64>,
        mem_ref: Option<u64>,
    ) {
        self.members.push(Member {
            address,
            length,
            label,
            file_ref,
            mem_ref,
        });
    }

    /// Record a member for the `length` bytes the cursor just consumed.
    pub(crate) fn field(&mut self, cursor: &Cursor<'_>, length: u64, label: String) {
        self.member(cursor.position() - length, length, label);
    }

    /// Record a member for the bytes the cursor just consumed, with
    /// cross-references.
    pub(crate) fn field_ref(
        &mut self,
        cursor: &Cursor<'_>,
        length: u64,
        label: String,
        file_ref: Option<u64>,
        mem_ref: Option<u64>,
    ) {
        self.member_ref(cursor.position() - length, length, label, file_ref, mem_ref);
    }

    /// Record an area.
    pub(crate) fn area(&mut self, offset: u64, length: u64, label: String) {
        self.areas.push(Area {
            offset,
            length,
            label,
        });
    }
}

/// Decode an ELF image into its annotation model.
///
/// Relocation tables are decoded for the default set of affected sections
/// ([`DEFAULT_AFFECTED`]).
pub fn parse(data: &[u8]) -> Result<Annotations> {
    parse_with_affected(data, DEFAULT_AFFECTED)
}

/// Decode an ELF image, decoding relocation tables for the given section
/// names.
///
/// For each name in `affected` that resolves to a section, the companion
/// `.rel<name>` and `.rela<name>` tables are decoded when present.
pub fn parse_with_affected(data: &[u8], affected: &[&str]) -> Result<Annotations> {
    let mut notes = Annotations::default();
    let mut cursor = Cursor::new(data);

    let header = header::parse(&mut cursor, &mut notes)?;
    segment::parse(&mut cursor, &header, &mut notes)?;
    let sections = section::parse(&mut cursor, &header, &mut notes)?;
    let symbols = symbol::parse(&mut cursor, &header, &sections, &mut notes)?;
    relocation::parse(&mut cursor, &header, &sections, &symbols, affected, &mut notes)?;

    Ok(notes)
}
