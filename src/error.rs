//! Error types for kafwire.

use thiserror::Error;

/// Main error type for all encoding operations.
///
/// Encoding is in-memory only, so every error is a length-prefix range
/// violation, caught before any bytes are appended.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// String too long for the fixed 16-bit length prefix (max 32767 bytes).
    #[error("string of {0} bytes exceeds the i16 length prefix")]
    StringTooLong(usize),

    /// Payload too long for a 32-bit length prefix.
    #[error("payload of {0} bytes exceeds the i32 length prefix")]
    PayloadTooLong(usize),

    /// Array with more elements than a 32-bit count prefix can hold.
    #[error("array of {0} elements exceeds the i32 count prefix")]
    ArrayTooLong(usize),
}

/// Result type alias using EncodeError.
pub type Result<T> = std::result::Result<T, EncodeError>;
