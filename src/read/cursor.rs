//! Primitive reads against the input buffer.

use std::convert::TryFrom;

use crate::endian::Endianness;
use crate::read::{Error, Result};

/// Longest string returned by [`read_cstring`].
const CSTRING_CAP: usize = 256;

/// An explicit read position over a borrowed byte buffer.
///
/// The cursor is the only mutable state in a decode. Every read is bounds
/// checked: running past the end of the buffer yields
/// [`Error::UnexpectedEof`] rather than panicking, so truncated images fail
/// with a defined error. Positions computed from file-supplied offsets use
/// saturating arithmetic; a saturated position is past any buffer end and
/// fails its read the same way.
#[derive(Debug, Clone)]
pub struct Cursor<'data> {
    data: &'data [u8],
    position: usize,
}

impl<'data> Cursor<'data> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'data [u8]) -> Self {
        Cursor { data, position: 0 }
    }

    /// The current byte offset.
    pub fn position(&self) -> u64 {
        self.position as u64
    }

    /// Move the cursor to an absolute byte offset.
    ///
    /// The offset may be out of range; the next read reports the failure.
    pub fn set_position(&mut self, position: u64) {
        self.position = usize::try_from(position).unwrap_or(usize::MAX);
    }

    /// The underlying buffer.
    pub fn data(&self) -> &'data [u8] {
        self.data
    }

    /// Read `size` bytes and advance.
    pub fn read_bytes(&mut self, size: usize) -> Result<&'data [u8]> {
        let bytes = self
            .data
            .get(self.position..)
            .and_then(|tail| tail.get(..size))
            .ok_or(Error::UnexpectedEof {
                offset: self.position as u64,
            })?;
        self.position += size;
        Ok(bytes)
    }

    /// Read `size` bytes and render them as a lowercase hex string.
    pub fn read_hex(&mut self, size: usize) -> Result<String> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        let bytes = self.read_bytes(size)?;
        let mut hex = String::with_capacity(size * 2);
        for &byte in bytes {
            hex.push(DIGITS[usize::from(byte >> 4)] as char);
            hex.push(DIGITS[usize::from(byte & 0xf)] as char);
        }
        Ok(hex)
    }

    /// Read an unsigned integer of `size` bytes in the given byte order.
    ///
    /// `size` must be 1, 2, 4, or 8. The result is widened to `u64` so that
    /// 64-bit fields never silently truncate.
    pub fn read_int(&mut self, endian: Endianness, size: usize) -> Result<u64> {
        match size {
            1 | 2 | 4 | 8 => {}
            _ => return Err(Error::InvalidReadSize { size }),
        }
        let bytes = self.read_bytes(size)?;
        Ok(endian.read_uint(bytes))
    }
}

/// Read the null-terminated string at `addr` in `data`, capped at 256 bytes.
///
/// This is a direct-address read used for string-table lookups; it involves
/// no cursor. An out-of-range address or a missing terminator is not an
/// error: the scan just ends at the buffer end or at the cap, and yields
/// whatever was accumulated.
pub(crate) fn read_cstring(data: &[u8], addr: u64) -> String {
    if addr >= data.len() as u64 {
        return String::new();
    }
    let tail = &data[addr as usize..];
    let tail = &tail[..tail.len().min(CSTRING_CAP)];
    let end = memchr::memchr(0, tail).unwrap_or(tail.len());
    tail[..end].iter().map(|&byte| byte as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_int_both_orders() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_int(Endianness::Little, 2).unwrap(), 0x3412);
        cursor.set_position(0);
        assert_eq!(cursor.read_int(Endianness::Big, 2).unwrap(), 0x1234);
        cursor.set_position(0);
        assert_eq!(cursor.read_int(Endianness::Little, 4).unwrap(), 0x7856_3412);
        cursor.set_position(0);
        assert_eq!(
            cursor.read_int(Endianness::Big, 8).unwrap(),
            0x1234_5678_9abc_def0
        );
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn read_int_rejects_odd_sizes() {
        let data = [0u8; 16];
        let mut cursor = Cursor::new(&data);
        assert_eq!(
            cursor.read_int(Endianness::Little, 3),
            Err(Error::InvalidReadSize { size: 3 })
        );
        // The failed read must not advance the cursor.
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn read_past_end_is_an_error() {
        let data = [0u8; 4];
        let mut cursor = Cursor::new(&data);
        cursor.set_position(2);
        assert_eq!(
            cursor.read_int(Endianness::Little, 4),
            Err(Error::UnexpectedEof { offset: 2 })
        );
        cursor.set_position(100);
        assert_eq!(
            cursor.read_bytes(1),
            Err(Error::UnexpectedEof { offset: 100 })
        );
    }

    #[test]
    fn read_hex_renders_lowercase() {
        let data = [0x7f, b'E', b'L', b'F'];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_hex(4).unwrap(), "7f454c46");
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn read_cstring_terminates() {
        let data = b"\0main\0tail";
        assert_eq!(read_cstring(data, 1), "main");
        assert_eq!(read_cstring(data, 0), "");
    }

    #[test]
    fn read_cstring_out_of_range() {
        assert_eq!(read_cstring(b"abc", 100), "");
    }

    #[test]
    fn read_cstring_caps_unterminated_runs() {
        let data = vec![b'a'; 1000];
        assert_eq!(read_cstring(&data, 0).len(), 256);
        // Unterminated but shorter than the cap: yields what is there.
        assert_eq!(read_cstring(b"abc", 1), "bc");
    }
}
