//! # `elfmap`
//!
//! `elfmap` decodes an ELF binary image into a byte-exact, navigable
//! annotation model: a flat, ordered list of labeled field descriptions
//! ([`Member`]) and a list of named, possibly overlapping byte ranges
//! ([`Area`]). It is the analytical core of a binary inspector; hex-view
//! highlighting, field tooltips, and click-to-jump navigation are all driven
//! by this model.
//!
//! The decode handles both register widths (32/64-bit) and both byte orders,
//! covering the header, the program and section header tables, the symbol
//! table, and relocation tables, including the cross-references that link a
//! symbol's declared value to the file bytes it designates.
//!
//! The input is a raw byte slice; reading the file is the caller's concern.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("a.out")?;
//! let annotations = elfmap::parse(&data)?;
//! for member in &annotations.members {
//!     println!("{:#x}+{:#x} {}", member.address, member.length, member.label);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod elf;

mod endian;
pub use endian::Endianness;

mod read;
pub use read::{
    parse, parse_with_affected, Annotations, Area, Error, Member, Result, DEFAULT_AFFECTED,
};
