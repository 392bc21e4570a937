//! Zigzag and base-128 varint primitives.
//!
//! Signed values are zigzag-transformed before varint encoding so that
//! small-magnitude values of either sign map to small unsigned codes:
//!
//! ```text
//!  0 -> 0    -1 -> 1    1 -> 2    -2 -> 3    2 -> 4 ...
//! ```
//!
//! Varint bytes are emitted least-significant group first, 7 data bits per
//! byte, with the high bit as the continuation flag:
//!
//! ```text
//! ┌───┬─────────────┐
//! │ C │ d6 ... d0   │   C = 1: more bytes follow, C = 0: final byte
//! └───┴─────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use kafwire::varint;
//!
//! let mut buf = Vec::new();
//! varint::put_varint32(&mut buf, -1);
//! assert_eq!(buf, [0x01]); // zigzag(-1) = 1, fits in one group
//! assert_eq!(varint::varint32_len(-1), 1);
//! ```

use bytes::BufMut;

/// Zigzag-transform a signed 32-bit value into its unsigned code.
///
/// The left shift is performed on the unsigned reinterpretation; the top bit
/// falling off is the intended two's-complement behavior.
#[inline]
pub fn zigzag32(v: i32) -> u32 {
    ((v as u32) << 1) ^ ((v >> 31) as u32)
}

/// Zigzag-transform a signed 64-bit value into its unsigned code.
#[inline]
pub fn zigzag64(v: i64) -> u64 {
    ((v as u64) << 1) ^ ((v >> 63) as u64)
}

/// Number of bytes [`put_varint32`] will emit for `v`.
///
/// Computed without encoding: one byte, plus one per 7-bit shift needed
/// until no bits remain above bit 6.
pub fn varint32_len(v: i32) -> usize {
    let mut z = zigzag32(v);
    let mut len = 1;
    while z & !0x7F != 0 {
        len += 1;
        z >>= 7;
    }
    len
}

/// Number of bytes [`put_varint64`] will emit for `v`.
pub fn varint64_len(v: i64) -> usize {
    let mut z = zigzag64(v);
    let mut len = 1;
    while z & !0x7F != 0 {
        len += 1;
        z >>= 7;
    }
    len
}

/// Zigzag-encode `v` and append its varint bytes to `buf`.
///
/// Emits exactly [`varint32_len`]`(v)` bytes.
pub fn put_varint32<B: BufMut>(buf: &mut B, v: i32) {
    let mut z = zigzag32(v);
    while z & !0x7F != 0 {
        buf.put_u8((z as u8 & 0x7F) | 0x80);
        z >>= 7;
    }
    buf.put_u8(z as u8);
}

/// Zigzag-encode `v` and append its varint bytes to `buf`.
///
/// Emits exactly [`varint64_len`]`(v)` bytes.
pub fn put_varint64<B: BufMut>(buf: &mut B, v: i64) {
    let mut z = zigzag64(v);
    while z & !0x7F != 0 {
        buf.put_u8((z as u8 & 0x7F) | 0x80);
        z >>= 7;
    }
    buf.put_u8(z as u8);
}
