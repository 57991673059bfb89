//! Error types for schema construction and `.mmsg` loading
//!
//! Schema errors are configuration mistakes: they surface when a message
//! definition is built or loaded, never while bytes are being encoded.

use thiserror::Error;

/// Errors that can occur while defining or loading a message schema
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchemaError {
    /// Field name is empty, does not start with a letter, or contains other characters
    #[error("Invalid field name '{name}': must start with a letter and contain only ASCII letters, digits or '_'")]
    InvalidFieldName { name: String },

    /// Field type is not one of the supported primitive kinds
    #[error("Unsupported type '{type_name}' for field '{field}': supported types are bool, uint8, uint16, uint32, uint64, float32, float64 and kind[N]")]
    UnsupportedType { field: String, type_name: String },

    /// Repeated field with zero or unparsable element count
    #[error("Invalid repeat count '{count}' for field '{field}': repeated fields need between 1 and 4294967295 elements")]
    InvalidRepeatCount { field: String, count: String },

    /// Two fields share a name
    #[error("Duplicate field '{name}' in message '{message}'")]
    DuplicateField { message: String, name: String },

    /// Message has no fields; the wire format cannot frame an empty message
    #[error("Message '{name}' has no content fields")]
    EmptyMessage { name: String },

    /// Total element count does not fit the array32 header
    #[error("Message '{name}' has {count} elements, above the array32 limit of 4294967295")]
    TooManyElements { name: String, count: u64 },

    /// Version is missing or not an integer
    #[error("Invalid version for message '{name}': {reason}")]
    InvalidVersion { name: String, reason: String },

    /// Structural problem in a schema document
    #[error("Malformed schema for message '{name}': {reason}")]
    Malformed { name: String, reason: String },

    /// Schema document is not valid YAML
    #[error("YAML error in schema for message '{name}': {details}")]
    Yaml { name: String, details: String },
}

impl SchemaError {
    /// Attach the field name to an error produced without one
    pub(crate) fn for_field(self, field: &str) -> Self {
        match self {
            SchemaError::UnsupportedType { type_name, .. } => SchemaError::UnsupportedType {
                field: field.to_string(),
                type_name,
            },
            SchemaError::InvalidRepeatCount { count, .. } => SchemaError::InvalidRepeatCount {
                field: field.to_string(),
                count,
            },
            other => other,
        }
    }
}
