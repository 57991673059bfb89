//! `.mmsg` schema documents
//!
//! ```yaml
//! version: 1
//! append_checksum: true
//! content:
//!   robot_id: uint16
//!   distance: float32[10]
//! ```
//!
//! Mapping order in `content` is wire order. The message name is not part
//! of the document; callers usually take it from the file name.

use serde::Deserialize;
use serde_yaml::Value;

use super::{FieldSpec, MessageSchema};
use crate::common::errors::SchemaError;

#[derive(Debug, Deserialize)]
struct MmsgDocument {
    version: Option<Value>,
    append_checksum: Option<Value>,
    content: Option<Value>,
}

impl MessageSchema {
    /// Load a schema from `.mmsg` YAML text
    pub fn from_mmsg_str(name: impl Into<String>, yaml: &str) -> Result<Self, SchemaError> {
        let name = name.into();

        let doc: MmsgDocument = serde_yaml::from_str(yaml).map_err(|err| SchemaError::Yaml {
            name: name.clone(),
            details: err.to_string(),
        })?;

        let version = parse_version(&name, doc.version.as_ref())?;

        // only a literal `true` enables the trailer
        let append_checksum = matches!(doc.append_checksum, Some(Value::Bool(true)));

        let content = match doc.content {
            Some(Value::Mapping(mapping)) if !mapping.is_empty() => mapping,
            Some(Value::Mapping(_)) | Some(Value::Null) | None => {
                return Err(SchemaError::EmptyMessage { name })
            }
            Some(_) => {
                return Err(SchemaError::Malformed {
                    name,
                    reason: "content must be a mapping of field name to type".to_string(),
                })
            }
        };

        let mut fields = Vec::with_capacity(content.len());
        for (key, value) in &content {
            let field_name = key.as_str().ok_or_else(|| SchemaError::Malformed {
                name: name.clone(),
                reason: format!("field name {key:?} is not a string"),
            })?;
            let type_str = value.as_str().ok_or_else(|| SchemaError::UnsupportedType {
                field: field_name.to_string(),
                type_name: format!("{value:?}"),
            })?;
            fields.push(FieldSpec::parse(field_name, type_str)?);
        }

        MessageSchema::new(name, version, fields, append_checksum)
    }
}

fn parse_version(name: &str, version: Option<&Value>) -> Result<u32, SchemaError> {
    let invalid = |reason: &str| SchemaError::InvalidVersion {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    match version {
        None | Some(Value::Null) => Err(invalid("no version specified")),
        Some(Value::Number(number)) => number
            .as_u64()
            .ok_or_else(|| invalid("version is not a non-negative integer"))
            .and_then(|v| u32::try_from(v).map_err(|_| invalid("version does not fit in 32 bits"))),
        Some(_) => Err(invalid("version is not an integer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PrimitiveKind;

    #[test]
    fn test_load_preserves_order() {
        let schema = MessageSchema::from_mmsg_str(
            "A",
            "version: 1\ncontent:\n  zeta: uint8\n  alpha: float32[3]\n  mid: bool\n",
        )
        .unwrap();

        let names: Vec<&str> = schema.fields().iter().map(FieldSpec::name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert_eq!(schema.fields()[1].kind(), PrimitiveKind::Float32);
        assert_eq!(schema.fields()[1].count(), 3);
        assert!(!schema.append_checksum());
    }

    #[test]
    fn test_append_checksum_needs_literal_true() {
        let on = MessageSchema::from_mmsg_str(
            "A",
            "version: 1\nappend_checksum: true\ncontent:\n  a: uint8\n",
        )
        .unwrap();
        assert!(on.append_checksum());

        let off = MessageSchema::from_mmsg_str(
            "A",
            "version: 1\nappend_checksum: yes please\ncontent:\n  a: uint8\n",
        )
        .unwrap();
        assert!(!off.append_checksum());
    }

    #[test]
    fn test_version_rules() {
        assert!(matches!(
            MessageSchema::from_mmsg_str("A", "content:\n  a: uint8\n"),
            Err(SchemaError::InvalidVersion { .. })
        ));
        assert!(matches!(
            MessageSchema::from_mmsg_str("A", "version: 1.5\ncontent:\n  a: uint8\n"),
            Err(SchemaError::InvalidVersion { .. })
        ));
        assert!(matches!(
            MessageSchema::from_mmsg_str("A", "version: one\ncontent:\n  a: uint8\n"),
            Err(SchemaError::InvalidVersion { .. })
        ));
        assert_eq!(
            MessageSchema::from_mmsg_str("A", "version: 7\ncontent:\n  a: uint8\n")
                .unwrap()
                .version(),
            7
        );
    }

    #[test]
    fn test_content_rules() {
        assert!(matches!(
            MessageSchema::from_mmsg_str("A", "version: 1\n"),
            Err(SchemaError::EmptyMessage { .. })
        ));
        assert!(matches!(
            MessageSchema::from_mmsg_str("A", "version: 1\ncontent: {}\n"),
            Err(SchemaError::EmptyMessage { .. })
        ));
        assert!(matches!(
            MessageSchema::from_mmsg_str("A", "version: 1\ncontent:\n  - a\n  - b\n"),
            Err(SchemaError::Malformed { .. })
        ));
        assert!(matches!(
            MessageSchema::from_mmsg_str("A", "version: 1\ncontent:\n  a: 5\n"),
            Err(SchemaError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            MessageSchema::from_mmsg_str("A", "version: [1\n"),
            Err(SchemaError::Yaml { .. })
        ));
    }
}
