//! # kafwire
//!
//! Length-prefixed, big-endian wire encoder for Kafka-style protocols.
//!
//! This crate produces the exact byte layout of Kafka-family request/response
//! bodies from native values: fixed-width signed integers, booleans,
//! length-prefixed UTF-8 strings and opaque byte payloads (with a `-1` null
//! sentinel), zigzag base-128 varints in 32- and 64-bit forms, arrays, and
//! verbatim sub-encoder embedding.
//!
//! It is purely an in-memory byte producer: transport, outer frame length
//! prefixes, message schemas, and decoding of received bytes all belong to
//! the caller.
//!
//! ## Example
//!
//! ```
//! use kafwire::{Encoder, Result};
//!
//! fn build_header() -> Result<Encoder> {
//!     let mut enc = Encoder::new();
//!     enc.put_i16(3)      // api_key
//!         .put_i16(1)     // api_version
//!         .put_i32(42);   // correlation_id
//!     enc.put_string(Some("my-client"))?;
//!     Ok(enc)
//! }
//!
//! let header = build_header().unwrap();
//! let mut message = Encoder::new();
//! message.put_i32(header.len() as i32).put_encoder(&header);
//! ```

pub mod encoder;
pub mod error;
pub mod varint;

pub use encoder::{ArrayElement, Encoder};
pub use error::{EncodeError, Result};
