//! Append-only wire encoder.
//!
//! [`Encoder`] accumulates one message body as an owned, growable byte
//! buffer. Every write appends; nothing ever truncates or rewrites earlier
//! bytes. All multi-byte integers are Big Endian.
//!
//! Length-prefixed layouts:
//!
//! ```text
//! ┌─────────────────┬────────────────────────────────────────────┐
//! │ String (fixed)  │ i16 len + UTF-8 bytes, len = -1 for null   │
//! │ String (varint) │ varint len + UTF-8 bytes, varint(-1) null  │
//! │ Bytes  (fixed)  │ i32 len + raw bytes, len = -1 for null     │
//! │ Bytes  (varint) │ varint len + raw bytes, varint(-1) null    │
//! │ Array           │ i32 count + encoded elements               │
//! │ VarInt Array    │ varint count + sub-encoder splices         │
//! └─────────────────┴────────────────────────────────────────────┘
//! ```
//!
//! Infallible writes return `&mut Self` for chaining; writes that can hit a
//! length-prefix range limit return `Result<&mut Self>` and compose with `?`.
//!
//! # Example
//!
//! ```
//! use kafwire::Encoder;
//!
//! let mut enc = Encoder::new();
//! enc.put_i16(3)              // api_key
//!     .put_i16(1)             // api_version
//!     .put_i32(42);           // correlation_id
//! enc.put_string(Some("my-client")).unwrap();
//!
//! // 2 + 2 + 4 + (2 + 9) bytes
//! assert_eq!(enc.len(), 19);
//! ```

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{EncodeError, Result};
use crate::varint;

/// Length-prefix sentinel for a null string or byte payload.
const NULL_SENTINEL: i32 = -1;

/// One element of a mixed-kind array.
///
/// The tag makes array dispatch exhaustive: the count prefix written by
/// [`Encoder::put_array`] always equals the number of elements actually
/// encoded, with no kind that could be skipped.
#[derive(Debug, Clone, Copy)]
pub enum ArrayElement<'a> {
    /// Encoded via [`Encoder::put_i32`].
    Int32(i32),
    /// Encoded via the fixed-width string writer ([`Encoder::put_string`]).
    String(Option<&'a str>),
    /// A finished sub-encoder, spliced verbatim ([`Encoder::put_encoder`]).
    Encoder(&'a Encoder),
}

/// Append-only encoder for one wire message body.
///
/// Backed by [`BytesMut`], so appends are O(1) amortized. The encoder does
/// not frame itself: callers wrap the finished buffer in whatever outer
/// length prefix their transport requires, using [`len`](Encoder::len) and
/// [`as_bytes`](Encoder::as_bytes) or [`into_bytes`](Encoder::into_bytes).
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Encoder {
    buf: BytesMut,
}

impl Encoder {
    /// Create an empty encoder.
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
        }
    }

    /// Create an empty encoder with pre-reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Append a signed 8-bit value.
    #[inline]
    pub fn put_i8(&mut self, v: i8) -> &mut Self {
        self.buf.put_i8(v);
        self
    }

    /// Append a signed 16-bit value, Big Endian.
    #[inline]
    pub fn put_i16(&mut self, v: i16) -> &mut Self {
        self.buf.put_i16(v);
        self
    }

    /// Append a signed 32-bit value, Big Endian.
    #[inline]
    pub fn put_i32(&mut self, v: i32) -> &mut Self {
        self.buf.put_i32(v);
        self
    }

    /// Append a signed 64-bit value, Big Endian (high word first).
    #[inline]
    pub fn put_i64(&mut self, v: i64) -> &mut Self {
        self.buf.put_i64(v);
        self
    }

    /// Append a boolean as one byte, `0x01` or `0x00`.
    #[inline]
    pub fn put_bool(&mut self, v: bool) -> &mut Self {
        self.buf.put_u8(v as u8);
        self
    }

    /// Append a zigzag varint-encoded 32-bit value.
    #[inline]
    pub fn put_varint(&mut self, v: i32) -> &mut Self {
        varint::put_varint32(&mut self.buf, v);
        self
    }

    /// Append a zigzag varint-encoded 64-bit value.
    #[inline]
    pub fn put_varint64(&mut self, v: i64) -> &mut Self {
        varint::put_varint64(&mut self.buf, v);
        self
    }

    /// Append a string with a fixed `i16` length prefix.
    ///
    /// `None` writes the `-1` sentinel and no payload. The UTF-8 byte length
    /// must fit the prefix; longer strings fail with
    /// [`EncodeError::StringTooLong`] before anything is appended.
    pub fn put_string(&mut self, s: Option<&str>) -> Result<&mut Self> {
        match s {
            None => {
                self.buf.put_i16(NULL_SENTINEL as i16);
            }
            Some(s) => {
                let n = s.len();
                if n > i16::MAX as usize {
                    return Err(EncodeError::StringTooLong(n));
                }
                self.buf.put_i16(n as i16);
                self.buf.put_slice(s.as_bytes());
            }
        }
        Ok(self)
    }

    /// Append a string with a varint length prefix.
    ///
    /// `None` writes varint(`-1`) and no payload. The length prefix is
    /// `i32`-range, so only strings beyond `i32::MAX` bytes are rejected.
    pub fn put_varint_string(&mut self, s: Option<&str>) -> Result<&mut Self> {
        match s {
            None => {
                varint::put_varint32(&mut self.buf, NULL_SENTINEL);
            }
            Some(s) => {
                let n = s.len();
                if n > i32::MAX as usize {
                    return Err(EncodeError::PayloadTooLong(n));
                }
                varint::put_varint32(&mut self.buf, n as i32);
                self.buf.put_slice(s.as_bytes());
            }
        }
        Ok(self)
    }

    /// Append an opaque byte payload with a fixed `i32` length prefix.
    ///
    /// `None` writes the `-1` sentinel and no payload.
    pub fn put_bytes(&mut self, v: Option<&[u8]>) -> Result<&mut Self> {
        match v {
            None => {
                self.buf.put_i32(NULL_SENTINEL);
            }
            Some(v) => {
                let n = v.len();
                if n > i32::MAX as usize {
                    return Err(EncodeError::PayloadTooLong(n));
                }
                self.buf.put_i32(n as i32);
                self.buf.put_slice(v);
            }
        }
        Ok(self)
    }

    /// Append an opaque byte payload with a varint length prefix.
    ///
    /// `None` writes varint(`-1`) and no payload.
    pub fn put_varint_bytes(&mut self, v: Option<&[u8]>) -> Result<&mut Self> {
        match v {
            None => {
                varint::put_varint32(&mut self.buf, NULL_SENTINEL);
            }
            Some(v) => {
                let n = v.len();
                if n > i32::MAX as usize {
                    return Err(EncodeError::PayloadTooLong(n));
                }
                varint::put_varint32(&mut self.buf, n as i32);
                self.buf.put_slice(v);
            }
        }
        Ok(self)
    }

    /// Splice a child encoder's bytes verbatim, with no added framing.
    ///
    /// Any length prefix around the child is the caller's job, via
    /// [`len`](Encoder::len) on the child before splicing.
    #[inline]
    pub fn put_encoder(&mut self, child: &Encoder) -> &mut Self {
        self.buf.put_slice(child.as_bytes());
        self
    }

    /// Append an array: `i32` element count, then each element.
    ///
    /// Elements are validated before the count prefix is written; a failed
    /// element must not leave a short array behind, so on error the buffer
    /// is untouched.
    pub fn put_array(&mut self, items: &[ArrayElement<'_>]) -> Result<&mut Self> {
        if items.len() > i32::MAX as usize {
            return Err(EncodeError::ArrayTooLong(items.len()));
        }
        for item in items {
            if let ArrayElement::String(Some(s)) = item {
                if s.len() > i16::MAX as usize {
                    return Err(EncodeError::StringTooLong(s.len()));
                }
            }
        }
        self.buf.put_i32(items.len() as i32);
        for item in items {
            match item {
                ArrayElement::Int32(v) => {
                    self.put_i32(*v);
                }
                ArrayElement::String(s) => {
                    // Validated above, cannot fail.
                    self.put_string(*s)?;
                }
                ArrayElement::Encoder(child) => {
                    self.put_encoder(child);
                }
            }
        }
        Ok(self)
    }

    /// Append an array with a varint count prefix.
    ///
    /// This path carries sub-encoder elements only; the signature keeps the
    /// wire format's asymmetry (no numeric or text elements here) structural.
    pub fn put_varint_array(&mut self, items: &[Encoder]) -> Result<&mut Self> {
        if items.len() > i32::MAX as usize {
            return Err(EncodeError::ArrayTooLong(items.len()));
        }
        varint::put_varint32(&mut self.buf, items.len() as i32);
        for child in items {
            self.put_encoder(child);
        }
        Ok(self)
    }

    /// Current total byte length of the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// View the accumulated bytes. Never mutates state.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the encoder, freezing the buffer for transport handoff.
    #[inline]
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("len", &self.buf.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_i32_minus_one_is_all_ff() {
        let mut enc = Encoder::new();
        enc.put_i32(-1);
        assert_eq!(enc.as_bytes(), [0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_fixed_width_big_endian_layout() {
        let mut enc = Encoder::new();
        enc.put_i8(0x01)
            .put_i16(0x0203)
            .put_i32(0x0405_0607)
            .put_i64(0x0809_0A0B_0C0D_0E0F);

        assert_eq!(
            enc.as_bytes(),
            [
                0x01, // i8
                0x02, 0x03, // i16 BE
                0x04, 0x05, 0x06, 0x07, // i32 BE
                0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, // i64 BE
            ]
        );
    }

    #[test]
    fn test_put_i64_negative_high_word_first() {
        let mut enc = Encoder::new();
        enc.put_i64(-2); // 0xFFFF_FFFF_FFFF_FFFE
        assert_eq!(
            enc.as_bytes(),
            [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]
        );
    }

    #[test]
    fn test_put_bool() {
        let mut enc = Encoder::new();
        enc.put_bool(true).put_bool(false);
        assert_eq!(enc.as_bytes(), [0x01, 0x00]);
    }

    #[test]
    fn test_put_string_null_is_ff_ff() {
        let mut enc = Encoder::new();
        enc.put_string(None).unwrap();
        assert_eq!(enc.as_bytes(), [0xFF, 0xFF]);
    }

    #[test]
    fn test_put_string_empty_is_zero_length() {
        let mut enc = Encoder::new();
        enc.put_string(Some("")).unwrap();
        assert_eq!(enc.as_bytes(), [0x00, 0x00]);
    }

    #[test]
    fn test_put_string_utf8_payload() {
        let mut enc = Encoder::new();
        enc.put_string(Some("héllo")).unwrap();

        let payload = "héllo".as_bytes(); // 6 bytes, é is 2 bytes in UTF-8
        assert_eq!(enc.as_bytes()[..2], [0x00, 0x06]);
        assert_eq!(&enc.as_bytes()[2..], payload);
    }

    #[test]
    fn test_put_string_too_long_leaves_buffer_unmodified() {
        let mut enc = Encoder::new();
        enc.put_i16(7);
        let before = enc.as_bytes().to_vec();

        let long = "x".repeat(i16::MAX as usize + 1);
        let err = enc.put_string(Some(&long)).unwrap_err();
        assert_eq!(err, EncodeError::StringTooLong(i16::MAX as usize + 1));
        assert_eq!(enc.as_bytes(), &before[..]);
    }

    #[test]
    fn test_put_string_at_i16_max_is_accepted() {
        let long = "x".repeat(i16::MAX as usize);
        let mut enc = Encoder::new();
        enc.put_string(Some(&long)).unwrap();
        assert_eq!(enc.as_bytes()[..2], [0x7F, 0xFF]);
        assert_eq!(enc.len(), 2 + i16::MAX as usize);
    }

    #[test]
    fn test_put_varint_string_null_is_single_byte() {
        // varint(zigzag(-1)) = varint(1) = 0x01
        let mut enc = Encoder::new();
        enc.put_varint_string(None).unwrap();
        assert_eq!(enc.as_bytes(), [0x01]);
    }

    #[test]
    fn test_put_varint_string_payload() {
        let mut enc = Encoder::new();
        enc.put_varint_string(Some("abc")).unwrap();
        // zigzag(3) = 6
        assert_eq!(enc.as_bytes(), [0x06, b'a', b'b', b'c']);
    }

    #[test]
    fn test_put_bytes_null_is_all_ff() {
        let mut enc = Encoder::new();
        enc.put_bytes(None).unwrap();
        assert_eq!(enc.as_bytes(), [0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_put_bytes_payload() {
        let mut enc = Encoder::new();
        enc.put_bytes(Some(&[0xDE, 0xAD])).unwrap();
        assert_eq!(enc.as_bytes(), [0x00, 0x00, 0x00, 0x02, 0xDE, 0xAD]);
    }

    #[test]
    fn test_put_bytes_empty_payload() {
        let mut enc = Encoder::new();
        enc.put_bytes(Some(&[])).unwrap();
        assert_eq!(enc.as_bytes(), [0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_put_varint_bytes_null_and_payload() {
        let mut enc = Encoder::new();
        enc.put_varint_bytes(None).unwrap();
        assert_eq!(enc.as_bytes(), [0x01]);

        let mut enc = Encoder::new();
        enc.put_varint_bytes(Some(b"hi")).unwrap();
        // zigzag(2) = 4
        assert_eq!(enc.as_bytes(), [0x04, b'h', b'i']);
    }

    #[test]
    fn test_len_accumulates_per_write() {
        let mut enc = Encoder::new();
        assert_eq!(enc.len(), 0);
        assert!(enc.is_empty());

        enc.put_i8(1);
        assert_eq!(enc.len(), 1);
        enc.put_i16(1);
        assert_eq!(enc.len(), 3);
        enc.put_i32(1);
        assert_eq!(enc.len(), 7);
        enc.put_i64(1);
        assert_eq!(enc.len(), 15);
        enc.put_bool(true);
        assert_eq!(enc.len(), 16);
        enc.put_string(Some("ab")).unwrap();
        assert_eq!(enc.len(), 20);
        enc.put_bytes(Some(&[0u8; 3])).unwrap();
        assert_eq!(enc.len(), 27);
        enc.put_varint(-1);
        assert_eq!(enc.len(), 28);
    }

    #[test]
    fn test_put_encoder_splices_verbatim() {
        let mut child = Encoder::new();
        child.put_i16(0x0102).put_bool(true);

        let mut parent = Encoder::new();
        parent.put_i32(child.len() as i32).put_encoder(&child);

        assert_eq!(parent.as_bytes(), [0x00, 0x00, 0x00, 0x03, 0x01, 0x02, 0x01]);
    }

    #[test]
    fn test_put_encoder_empty_child_adds_nothing() {
        let child = Encoder::new();
        let mut parent = Encoder::new();
        parent.put_i8(0x7F).put_encoder(&child);
        assert_eq!(parent.as_bytes(), [0x7F]);
    }

    #[test]
    fn test_put_array_mixed_elements() {
        let mut child = Encoder::new();
        child.put_i8(0x0A);

        let mut enc = Encoder::new();
        enc.put_array(&[
            ArrayElement::Int32(1),
            ArrayElement::String(Some("x")),
            ArrayElement::String(None),
            ArrayElement::Encoder(&child),
        ])
        .unwrap();

        assert_eq!(
            enc.as_bytes(),
            [
                0x00, 0x00, 0x00, 0x04, // count = 4
                0x00, 0x00, 0x00, 0x01, // Int32(1)
                0x00, 0x01, b'x', // String("x")
                0xFF, 0xFF, // String(None)
                0x0A, // spliced child
            ]
        );
    }

    #[test]
    fn test_put_array_empty() {
        let mut enc = Encoder::new();
        enc.put_array(&[]).unwrap();
        assert_eq!(enc.as_bytes(), [0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_put_array_oversized_string_leaves_buffer_unmodified() {
        let long = "x".repeat(i16::MAX as usize + 1);
        let mut enc = Encoder::new();
        enc.put_i8(1);

        let err = enc
            .put_array(&[ArrayElement::Int32(5), ArrayElement::String(Some(&long))])
            .unwrap_err();
        assert!(matches!(err, EncodeError::StringTooLong(_)));
        // No count prefix, no partial elements.
        assert_eq!(enc.as_bytes(), [0x01]);
    }

    #[test]
    fn test_put_varint_array_of_sub_encoders() {
        let mut a = Encoder::new();
        a.put_i8(0x01);
        let mut b = Encoder::new();
        b.put_i8(0x02);

        let mut enc = Encoder::new();
        enc.put_varint_array(&[a, b]).unwrap();

        // zigzag(2) = 4
        assert_eq!(enc.as_bytes(), [0x04, 0x01, 0x02]);
    }

    #[test]
    fn test_put_varint_array_empty() {
        let mut enc = Encoder::new();
        enc.put_varint_array(&[]).unwrap();
        assert_eq!(enc.as_bytes(), [0x00]);
    }

    #[test]
    fn test_into_bytes_matches_as_bytes() {
        let mut enc = Encoder::new();
        enc.put_i32(7).put_bool(false);
        let view = enc.as_bytes().to_vec();
        let frozen = enc.into_bytes();
        assert_eq!(&frozen[..], &view[..]);
    }

    #[test]
    fn test_with_capacity_starts_empty() {
        let enc = Encoder::with_capacity(1024);
        assert!(enc.is_empty());
        assert_eq!(enc.len(), 0);
    }
}
