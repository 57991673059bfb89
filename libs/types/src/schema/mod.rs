//! # Message Schema
//!
//! A message is an ordered list of fields, each a primitive kind repeated a
//! fixed number of times, optionally followed by an integrity trailer. The
//! schema is the contract both endpoints share: nothing on the wire says
//! which type comes next, so encoder and decoder must walk the same list.
//!
//! ## Wire Layout
//!
//! ```text
//! [array header: element_count] [field 0 elements] ... [field n elements] [trailer?]
//! ```
//!
//! The header counts elements (a `float32[10]` field contributes ten) and
//! does not count the trailer.

#[cfg(feature = "schema")]
mod mmsg;

use std::num::NonZeroU32;

use crate::common::errors::SchemaError;
use crate::protocol::constants::{array_header_len, TRAILER_LEN};
use crate::value::PrimitiveKind;

/// One field of a message: a name, a primitive kind and a repeat count
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    name: String,
    kind: PrimitiveKind,
    count: NonZeroU32,
}

impl FieldSpec {
    /// Scalar field (repeat count 1)
    pub fn new(name: impl Into<String>, kind: PrimitiveKind) -> Result<Self, SchemaError> {
        Self::repeated(name, kind, 1)
    }

    /// Homogeneous repeated field with `count` elements
    pub fn repeated(
        name: impl Into<String>,
        kind: PrimitiveKind,
        count: u32,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        validate_field_name(&name)?;
        let count = NonZeroU32::new(count).ok_or_else(|| SchemaError::InvalidRepeatCount {
            field: name.clone(),
            count: count.to_string(),
        })?;
        Ok(Self { name, kind, count })
    }

    /// Parse a field from its schema type string: `uint16` or `float32[10]`
    pub fn parse(name: impl Into<String>, type_str: &str) -> Result<Self, SchemaError> {
        let name = name.into();
        let type_str = type_str.trim();

        let (kind_str, count) = match type_str.strip_suffix(']') {
            Some(rest) => {
                let (kind_str, count_str) =
                    rest.split_once('[').ok_or_else(|| SchemaError::UnsupportedType {
                        field: name.clone(),
                        type_name: type_str.to_string(),
                    })?;
                if count_str.is_empty() || !count_str.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(SchemaError::InvalidRepeatCount {
                        field: name,
                        count: count_str.to_string(),
                    });
                }
                let count = count_str
                    .parse::<u32>()
                    .map_err(|_| SchemaError::InvalidRepeatCount {
                        field: name.clone(),
                        count: count_str.to_string(),
                    })?;
                (kind_str, count)
            }
            None => (type_str, 1),
        };

        let kind = kind_str
            .parse::<PrimitiveKind>()
            .map_err(|err| err.for_field(&name))?;

        Self::repeated(name, kind, count)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn count(&self) -> u32 {
        self.count.get()
    }

    pub fn is_repeated(&self) -> bool {
        self.count.get() > 1
    }

    /// Bytes this field occupies on the wire
    pub fn encoded_len(&self) -> usize {
        self.kind.encoded_len() * self.count.get() as usize
    }

    /// Schema type string, inverse of [`FieldSpec::parse`]
    pub fn type_string(&self) -> String {
        if self.is_repeated() {
            format!("{}[{}]", self.kind.name(), self.count)
        } else {
            self.kind.name().to_string()
        }
    }
}

/// Ordered field list plus trailer flag for one message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSchema {
    name: String,
    version: u32,
    fields: Vec<FieldSpec>,
    append_checksum: bool,
    element_count: NonZeroU32,
}

impl MessageSchema {
    /// Build a schema, rejecting empty messages, duplicate field names and
    /// element counts the array32 header cannot carry
    pub fn new(
        name: impl Into<String>,
        version: u32,
        fields: Vec<FieldSpec>,
        append_checksum: bool,
    ) -> Result<Self, SchemaError> {
        let name = name.into();

        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|earlier| earlier.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    message: name,
                    name: field.name.clone(),
                });
            }
        }

        let total: u64 = fields.iter().map(|f| u64::from(f.count())).sum();
        let element_count = u32::try_from(total)
            .map_err(|_| SchemaError::TooManyElements {
                name: name.clone(),
                count: total,
            })
            .and_then(|count| {
                NonZeroU32::new(count).ok_or_else(|| SchemaError::EmptyMessage { name: name.clone() })
            })?;

        Ok(Self {
            name,
            version,
            fields,
            append_checksum,
            element_count,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn append_checksum(&self) -> bool {
        self.append_checksum
    }

    /// Position and spec of the field called `name`
    pub fn field(&self, name: &str) -> Option<(usize, &FieldSpec)> {
        self.fields.iter().enumerate().find(|(_, f)| f.name == name)
    }

    /// Count carried by the top-level array header
    pub fn element_count(&self) -> u32 {
        self.element_count.get()
    }

    /// [`element_count`](Self::element_count), which is never zero
    pub fn header_count(&self) -> NonZeroU32 {
        self.element_count
    }

    /// Exact size of an encoded message, trailer included when enabled
    pub fn encoded_size(&self) -> usize {
        let header = array_header_len(self.element_count.get());
        let body: usize = self.fields.iter().map(FieldSpec::encoded_len).sum();
        let trailer = if self.append_checksum { TRAILER_LEN } else { 0 };
        header + body + trailer
    }
}

fn validate_field_name(name: &str) -> Result<(), SchemaError> {
    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if starts_with_letter && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(SchemaError::InvalidFieldName {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("robot_id", PrimitiveKind::Uint16).unwrap(),
            FieldSpec::repeated("distance", PrimitiveKind::Float32, 10).unwrap(),
            FieldSpec::repeated("angle", PrimitiveKind::Float64, 10).unwrap(),
        ]
    }

    #[test]
    fn test_parse_plain_and_array_types() {
        let plain = FieldSpec::parse("foo", "uint8").unwrap();
        assert_eq!(plain.kind(), PrimitiveKind::Uint8);
        assert_eq!(plain.count(), 1);
        assert!(!plain.is_repeated());

        let array = FieldSpec::parse("bar", "float64[12]").unwrap();
        assert_eq!(array.kind(), PrimitiveKind::Float64);
        assert_eq!(array.count(), 12);
        assert_eq!(array.type_string(), "float64[12]");
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        assert!(matches!(
            FieldSpec::parse("foo", "int32"),
            Err(SchemaError::UnsupportedType { field, .. }) if field == "foo"
        ));
        assert!(matches!(
            FieldSpec::parse("foo", "float32[0]"),
            Err(SchemaError::InvalidRepeatCount { .. })
        ));
        assert!(matches!(
            FieldSpec::parse("foo", "float32[-1]"),
            Err(SchemaError::InvalidRepeatCount { .. })
        ));
        assert!(matches!(
            FieldSpec::parse("foo", "float32]"),
            Err(SchemaError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_field_names() {
        assert!(FieldSpec::new("bool_val", PrimitiveKind::Bool).is_ok());
        assert!(FieldSpec::new("x1", PrimitiveKind::Bool).is_ok());
        assert!(FieldSpec::new("1x", PrimitiveKind::Bool).is_err());
        assert!(FieldSpec::new("", PrimitiveKind::Bool).is_err());
        assert!(FieldSpec::new("has space", PrimitiveKind::Bool).is_err());
        assert!(FieldSpec::new("_hidden", PrimitiveKind::Bool).is_err());
    }

    #[test]
    fn test_sizes() {
        let schema = MessageSchema::new("SensorData", 1, sensor_fields(), true).unwrap();
        assert_eq!(schema.element_count(), 21);
        // array16 header, uint16, 10 x float32, 10 x float64, trailer
        assert_eq!(schema.encoded_size(), 3 + 3 + 50 + 90 + 3);

        let no_crc = MessageSchema::new("SensorData", 1, sensor_fields(), false).unwrap();
        assert_eq!(no_crc.encoded_size(), schema.encoded_size() - 3);
    }

    #[test]
    fn test_empty_and_duplicate_rejected() {
        assert!(matches!(
            MessageSchema::new("Empty", 1, vec![], false),
            Err(SchemaError::EmptyMessage { .. })
        ));

        let dup = vec![
            FieldSpec::new("a", PrimitiveKind::Uint8).unwrap(),
            FieldSpec::new("a", PrimitiveKind::Uint16).unwrap(),
        ];
        assert!(matches!(
            MessageSchema::new("Dup", 1, dup, false),
            Err(SchemaError::DuplicateField { .. })
        ));
    }

    #[test]
    fn test_element_count_overflow_rejected() {
        let fields = vec![
            FieldSpec::repeated("a", PrimitiveKind::Bool, u32::MAX).unwrap(),
            FieldSpec::new("b", PrimitiveKind::Bool).unwrap(),
        ];
        assert!(matches!(
            MessageSchema::new("Huge", 1, fields, false),
            Err(SchemaError::TooManyElements { count, .. }) if count == u64::from(u32::MAX) + 1
        ));
    }

    #[test]
    fn test_field_lookup() {
        let schema = MessageSchema::new("SensorData", 1, sensor_fields(), false).unwrap();
        let (index, spec) = schema.field("angle").unwrap();
        assert_eq!(index, 2);
        assert_eq!(spec.kind(), PrimitiveKind::Float64);
        assert!(schema.field("missing").is_none());
    }
}
