//! Codec-level errors for encoding and decoding microbuf messages
//!
//! Every failure is reported to the immediate caller; nothing is retried.
//! Variants carry the offset and sizes involved so a log line is enough to
//! tell corruption apart from a schema mismatch between endpoints.

use microbuf_types::{PrimitiveKind, SchemaError, WireTag};
use thiserror::Error;

/// Encoding and decoding errors with diagnostic context
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    /// Tag byte does not belong to the expected type
    #[error("Tag mismatch at offset {offset}: expected {expected}, got {actual:#04x} ({actual_name}, hint: {hint})")]
    TagMismatch {
        offset: usize,
        expected: &'static str,
        actual: u8,
        actual_name: &'static str,
        hint: &'static str,
    },

    /// Not enough bytes left to read a full tag and payload
    #[error("Truncated input at offset {offset}: need {need} bytes, {available} available (context: {context})")]
    Truncated {
        offset: usize,
        need: usize,
        available: usize,
        context: &'static str,
    },

    /// Output buffer cannot hold the bytes being written
    #[error("Buffer too small: need {need} bytes, got {got} (context: {context})")]
    BufferTooSmall {
        need: usize,
        got: usize,
        context: &'static str,
    },

    /// Array or repeated run with zero elements
    #[error("Zero-length array rejected: arrays and repeated fields need at least one element (context: {context})")]
    ZeroLength { context: &'static str },

    /// Count above the array32 limit of 2^32 - 1
    #[error("Array length {count} exceeds the array32 limit of 4294967295")]
    LengthOverflow { count: u64 },

    /// Byte in header position is not a recognized array header form
    #[error("Invalid array header at offset {offset}: byte {byte:#04x} ({byte_name}) is not fixarray, array16 or array32")]
    InvalidArrayHeader {
        offset: usize,
        byte: u8,
        byte_name: &'static str,
    },

    /// Decoded array count differs from the schema
    #[error("Array count mismatch at offset {offset}: expected {expected}, decoded {actual}")]
    CountMismatch {
        offset: usize,
        expected: u32,
        actual: u32,
    },

    /// Trailer checksum does not match the message bytes
    #[error("Checksum mismatch: trailer {expected:#06x}, calculated {calculated:#06x} (message: {message_size} bytes, cause: {likely_cause})")]
    ChecksumMismatch {
        expected: u16,
        calculated: u16,
        message_size: usize,
        likely_cause: &'static str,
    },

    /// Input exceeds the configured maximum message size
    #[error("Message too large: {size} bytes exceeds maximum {max}")]
    MessageTooLarge { size: usize, max: usize },

    /// Bytes left over after a complete message was decoded
    #[error("Trailing bytes: message ends at {consumed}, input has {total} bytes")]
    TrailingBytes { consumed: usize, total: usize },

    /// Schema field has not been given a value
    #[error("Field '{field}' has no value")]
    MissingField { field: String },

    /// Name does not match any schema field
    #[error("Unknown field '{field}' for message '{message}'")]
    UnknownField { field: String, message: String },

    /// Value kind differs from the schema field kind
    #[error("Kind mismatch for field '{field}': schema says {expected}, value is {actual}")]
    KindMismatch {
        field: String,
        expected: PrimitiveKind,
        actual: PrimitiveKind,
    },

    /// Number of values differs from the schema repeat count
    #[error("Element count mismatch for field '{field}': schema says {expected}, got {actual}")]
    ElementCountMismatch {
        field: String,
        expected: u32,
        actual: usize,
    },

    /// Configuration could not be parsed
    #[error("Invalid codec configuration: {0}")]
    Config(String),

    /// Schema definition error
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl CodecError {
    /// Create TagMismatch with a hint about what the wrong byte suggests
    pub fn tag_mismatch(offset: usize, expected: &'static str, actual: u8) -> Self {
        let hint = if microbuf_types::is_fixarray(actual) {
            "found an array header - field order differs between endpoints"
        } else {
            match WireTag::try_from(actual) {
                Ok(tag) if tag.is_array_marker() => {
                    "found an array header - field order differs between endpoints"
                }
                Ok(_) => "different primitive type - schema version mismatch",
                Err(_) => "not a microbuf tag - corrupted data or misaligned offset",
            }
        };

        Self::TagMismatch {
            offset,
            expected,
            actual,
            actual_name: WireTag::describe(actual),
            hint,
        }
    }

    /// Create Truncated for a read of `need` bytes at `offset`
    pub fn truncated(buffer_len: usize, offset: usize, need: usize, context: &'static str) -> Self {
        Self::Truncated {
            offset,
            need,
            available: buffer_len.saturating_sub(offset),
            context,
        }
    }

    /// Create ChecksumMismatch with a guess at the cause
    pub fn checksum_mismatch(expected: u16, calculated: u16, message_size: usize) -> Self {
        let likely_cause = if expected == 0 {
            "trailer bytes never written - message sealed without checksum"
        } else if expected.swap_bytes() == calculated {
            "checksum stored in host byte order instead of canonical order"
        } else {
            "data corruption during transmission"
        };

        Self::ChecksumMismatch {
            expected,
            calculated,
            message_size,
            likely_cause,
        }
    }
}

/// Result type for codec operations
pub type CodecResult<T> = std::result::Result<T, CodecError>;
