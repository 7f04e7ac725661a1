//! Byte-order handling.

use std::fmt;

/// The byte order of an ELF image, detected at run time from the
/// identification bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

impl Endianness {
    /// Assemble an unsigned integer from `bytes` in this byte order.
    ///
    /// The result is widened to `u64` so that full 64-bit fields survive
    /// without truncation.
    pub(crate) fn read_uint(self, bytes: &[u8]) -> u64 {
        let mut value = 0;
        match self {
            Endianness::Little => {
                for &byte in bytes.iter().rev() {
                    value = value << 8 | u64::from(byte);
                }
            }
            Endianness::Big => {
                for &byte in bytes {
                    value = value << 8 | u64::from(byte);
                }
            }
        }
        value
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endianness::Little => f.write_str("little"),
            Endianness::Big => f.write_str("big"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_uint_little() {
        assert_eq!(Endianness::Little.read_uint(&[0x34, 0x12]), 0x1234);
        assert_eq!(
            Endianness::Little.read_uint(&[1, 2, 3, 4, 5, 6, 7, 8]),
            0x0807_0605_0403_0201
        );
    }

    #[test]
    fn read_uint_big() {
        assert_eq!(Endianness::Big.read_uint(&[0x12, 0x34]), 0x1234);
        assert_eq!(
            Endianness::Big.read_uint(&[1, 2, 3, 4, 5, 6, 7, 8]),
            0x0102_0304_0506_0708
        );
    }

    #[test]
    fn read_uint_full_width() {
        assert_eq!(Endianness::Little.read_uint(&[0xff; 8]), u64::MAX);
    }
}
