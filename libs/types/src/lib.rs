//! # Microbuf Types Library
//!
//! Pure data definitions shared by every microbuf endpoint: the one-byte wire
//! tag table, encoded widths, primitive kinds and values, and the message
//! schema that tells an encoder which fields appear on the wire and in what
//! order.
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → libs/codec → transport (external)
//!     ↑             ↓
//! Wire Tags     Canonicalizer, Tag Codec,
//! Schemas       Framer, Repeater, Trailer
//! ```
//!
//! Nothing in this crate touches a byte buffer. Encoding and decoding rules
//! live in the codec crate; this crate only describes what the bytes mean.
//!
//! ## Quick Start
//!
//! ```rust
//! use microbuf_types::{FieldSpec, MessageSchema, PrimitiveKind};
//!
//! let schema = MessageSchema::new(
//!     "SensorData",
//!     1,
//!     vec![
//!         FieldSpec::new("robot_id", PrimitiveKind::Uint16).unwrap(),
//!         FieldSpec::repeated("distance", PrimitiveKind::Float32, 10).unwrap(),
//!     ],
//!     true,
//! )
//! .unwrap();
//!
//! // 11 elements → fixarray header, 3 + 50 bytes of fields, 3 byte trailer
//! assert_eq!(schema.element_count(), 11);
//! assert_eq!(schema.encoded_size(), 1 + 3 + 50 + 3);
//! ```

pub mod common;
pub mod protocol;
pub mod schema;
pub mod value;

pub use common::errors::SchemaError;
pub use protocol::{constants::*, WireTag};
pub use schema::{FieldSpec, MessageSchema};
pub use value::{PrimitiveKind, PrimitiveValue};
