//! Big-endian wire codecs.
//!
//! The on-disk format is big-endian throughout. Values are decoded to
//! host-native integers unconditionally — no endianness probing.

use byteorder::{BigEndian, ByteOrder};

/// Decode a big-endian u16 from the start of `buf`.
#[inline]
pub fn be_u16(buf: &[u8]) -> u16 {
    BigEndian::read_u16(buf)
}

/// Decode a big-endian u32 from the start of `buf`.
#[inline]
pub fn be_u32(buf: &[u8]) -> u32 {
    BigEndian::read_u32(buf)
}
