//! # Microbuf Codec
//!
//! ## Purpose
//!
//! The "rules" layer of microbuf: how the data described in
//! `microbuf-types` becomes bytes and back again.
//!
//! - Canonical (most significant byte first) integer and float payloads
//! - Tagged primitive encode/decode with tag checking
//! - Array-length headers in fixarray / array16 / array32 form
//! - Homogeneous repeated runs without per-run headers
//! - CRC-16 integrity trailer
//! - Growable and compile-time sized buffers with identical output
//! - Schema-driven message builder and parser
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → transport (external)
//!     ↑           ↓            ↓
//! Wire Tags   Encoding     Opaque blobs,
//! Schemas     Validation   one message each
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Transport, framing between messages, or retries
//! - Schema compilation into generated code
//!
//! ## Quick Start
//!
//! ```rust
//! use codec::{FixedBuffer, MessageParser};
//! use microbuf_types::{FieldSpec, MessageSchema, PrimitiveKind};
//!
//! let mut buf = FixedBuffer::<13>::new();
//! buf.put_array_header::<0, 1>();
//! buf.put::<u64, 1>(1234567890123456789);
//! buf.seal();
//! assert_eq!(buf.as_bytes()[10..], [0xCD, 0x14, 0xE9]);
//!
//! let schema = MessageSchema::new(
//!     "Scenario",
//!     1,
//!     vec![FieldSpec::new("value", PrimitiveKind::Uint64).unwrap()],
//!     true,
//! )
//! .unwrap();
//! let decoded = MessageParser::new(&schema).parse(buf.as_bytes()).unwrap();
//! assert_eq!(decoded.get_as::<u64>("value").unwrap(), 1234567890123456789);
//! ```

pub mod array;
pub mod buffers;
pub mod builder;
pub mod canonical;
pub mod cursor;
pub mod error;
pub mod parser;
pub mod primitive;
pub mod repeat;
pub mod validation;

pub use array::{
    append_array_header, decode_array_header, encode_array_header, expect_array_header,
    write_array_header, ArrayForm, ArrayLength,
};
pub use buffers::{FixedBuffer, GrowableBuffer};
pub use builder::MessageBuilder;
pub use canonical::Canonical;
pub use cursor::{SliceWriter, WireReader, WireWriter};
pub use error::{CodecError, CodecResult};
pub use parser::{DecodedField, DecodedMessage, MessageParser};
pub use primitive::{
    append, decode, decode_at, decode_value_at, encode, encode_value, write_at, Encoded, Primitive,
};
pub use repeat::{decode_many, decode_many_into, encode_many, write_many};
pub use validation::{
    append_trailer, check_trailer, crc16_aug_ccitt, push_trailer, verify_trailer, CodecConfig,
    Crc16, DecodePolicy, CRC16_EMPTY, CRC16_POLY,
};
