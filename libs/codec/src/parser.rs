//! # Schema-Driven Message Parser
//!
//! ## Purpose
//!
//! Decodes a received blob against the [`MessageSchema`] both endpoints
//! share. The wire carries no field names or kinds beyond each value's tag,
//! so the parser walks the schema and demands the expected tag at every
//! position.
//!
//! ## Validation Order
//!
//! ```text
//! size limit → array header → exact length → trailer → fields
//! (config)     (count)        (trailing      (CRC-16)  (tags)
//!                              policy)
//! ```
//!
//! Any failure rejects the whole message; nothing partially decoded is
//! returned. Failures are logged at `warn` for corruption (checksum) and
//! `debug` for everything else, with a hex dump of the input.

use microbuf_types::{FieldSpec, MessageSchema, PrimitiveKind, PrimitiveValue, TRAILER_LEN};
use tracing::{debug, warn};

use crate::array::ArrayLength;
use crate::cursor::WireReader;
use crate::error::{CodecError, CodecResult};
use crate::primitive::Primitive;
use crate::validation::config::CodecConfig;
use crate::validation::trailer::check_trailer;

/// Decodes messages of one schema
#[derive(Debug, Clone)]
pub struct MessageParser<'s> {
    schema: &'s MessageSchema,
    config: CodecConfig,
}

impl<'s> MessageParser<'s> {
    /// Parser with the default configuration
    pub fn new(schema: &'s MessageSchema) -> Self {
        Self::with_config(schema, CodecConfig::default())
    }

    pub fn with_config(schema: &'s MessageSchema, config: CodecConfig) -> Self {
        Self { schema, config }
    }

    pub fn schema(&self) -> &'s MessageSchema {
        self.schema
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode one message
    pub fn parse(&self, bytes: &[u8]) -> CodecResult<DecodedMessage<'s>> {
        self.parse_inner(bytes).map_err(|err| {
            if matches!(err, CodecError::ChecksumMismatch { .. }) {
                warn!(
                    message = self.schema.name(),
                    error = %err,
                    bytes = %hex::encode(bytes),
                    "Discarding corrupted message"
                );
            } else {
                debug!(
                    message = self.schema.name(),
                    error = %err,
                    bytes = %hex::encode(bytes),
                    "Message decode failed"
                );
            }
            err
        })
    }

    fn parse_inner(&self, bytes: &[u8]) -> CodecResult<DecodedMessage<'s>> {
        if let Some(max) = self.config.max_message_size {
            if bytes.len() > max {
                return Err(CodecError::MessageTooLarge {
                    size: bytes.len(),
                    max,
                });
            }
        }

        let mut reader = WireReader::new(bytes);
        reader.expect_array_header(ArrayLength::from(self.schema.header_count()))?;

        // the header may use a non-minimal form, so measure from where it ended
        let body_len: usize = self.schema.fields().iter().map(FieldSpec::encoded_len).sum();
        let trailer_len = if self.schema.append_checksum() { TRAILER_LEN } else { 0 };
        let message_len = reader.position() + body_len + trailer_len;

        if bytes.len() < message_len {
            return Err(CodecError::truncated(bytes.len(), 0, message_len, "message body"));
        }
        if bytes.len() > message_len && !self.config.decode.allow_trailing_bytes {
            return Err(CodecError::TrailingBytes {
                consumed: message_len,
                total: bytes.len(),
            });
        }
        let message = &bytes[..message_len];

        let checksum = if self.schema.append_checksum() && self.config.decode.verify_checksum {
            Some(check_trailer(message)?)
        } else {
            None
        };

        let mut reader = WireReader::at(message, reader.position());
        let mut fields = Vec::with_capacity(self.schema.fields().len());
        for spec in self.schema.fields() {
            let values = (0..spec.count())
                .map(|_| reader.take_value(spec.kind()))
                .collect::<CodecResult<Vec<_>>>()?;
            fields.push(DecodedField { spec, values });
        }
        let checksum = if self.schema.append_checksum() {
            // the tag is checked even when the value is not verified
            let stored = reader.take::<u16>()?;
            checksum.or(Some(stored))
        } else {
            None
        };
        let consumed = reader.finish()?;

        debug!(message = self.schema.name(), len = consumed, "Parsed message");
        Ok(DecodedMessage {
            schema: self.schema,
            fields,
            checksum,
            consumed,
        })
    }
}

/// One decoded field
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField<'s> {
    spec: &'s FieldSpec,
    values: Vec<PrimitiveValue>,
}

impl<'s> DecodedField<'s> {
    pub fn name(&self) -> &'s str {
        self.spec.name()
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.spec.kind()
    }

    pub fn spec(&self) -> &'s FieldSpec {
        self.spec
    }

    /// Every element, in wire order
    pub fn values(&self) -> &[PrimitiveValue] {
        &self.values
    }

    /// First element; the only one for scalar fields
    pub fn value(&self) -> PrimitiveValue {
        // fields always decode at least one element
        self.values[0]
    }
}

/// A fully decoded and validated message
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage<'s> {
    schema: &'s MessageSchema,
    fields: Vec<DecodedField<'s>>,
    checksum: Option<u16>,
    consumed: usize,
}

impl<'s> DecodedMessage<'s> {
    pub fn schema(&self) -> &'s MessageSchema {
        self.schema
    }

    pub fn fields(&self) -> &[DecodedField<'s>] {
        &self.fields
    }

    /// Trailer value, for schemas that carry one
    pub fn checksum(&self) -> Option<u16> {
        self.checksum
    }

    /// Bytes the message occupied in the input
    pub fn len(&self) -> usize {
        self.consumed
    }

    /// Always false; a message holds at least its header
    pub fn is_empty(&self) -> bool {
        self.consumed == 0
    }

    pub fn get(&self, name: &str) -> Option<&DecodedField<'s>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Scalar field as a native value
    pub fn get_as<T: Primitive>(&self, name: &str) -> CodecResult<T> {
        let field = self.field_of_kind::<T>(name)?;
        if field.values.len() != 1 {
            return Err(CodecError::ElementCountMismatch {
                field: name.to_string(),
                expected: 1,
                actual: field.values.len(),
            });
        }
        self.convert(field, field.value())
    }

    /// Every element of a field as native values
    pub fn get_many_as<T: Primitive>(&self, name: &str) -> CodecResult<Vec<T>> {
        let field = self.field_of_kind::<T>(name)?;
        field
            .values
            .iter()
            .map(|&value| self.convert(field, value))
            .collect()
    }

    fn field_of_kind<T: Primitive>(&self, name: &str) -> CodecResult<&DecodedField<'s>> {
        let field = self.get(name).ok_or_else(|| CodecError::UnknownField {
            field: name.to_string(),
            message: self.schema.name().to_string(),
        })?;
        if field.kind() != T::KIND {
            return Err(CodecError::KindMismatch {
                field: name.to_string(),
                expected: field.kind(),
                actual: T::KIND,
            });
        }
        Ok(field)
    }

    fn convert<T: Primitive>(&self, field: &DecodedField<'s>, value: PrimitiveValue) -> CodecResult<T> {
        T::from_value(value).ok_or_else(|| CodecError::KindMismatch {
            field: field.name().to_string(),
            expected: field.kind(),
            actual: value.kind(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MessageBuilder;
    use crate::validation::config::DecodePolicy;
    use hex_literal::hex;

    fn scenario_schema() -> MessageSchema {
        MessageSchema::new(
            "Scenario",
            1,
            vec![FieldSpec::new("value", PrimitiveKind::Uint64).unwrap()],
            true,
        )
        .unwrap()
    }

    const SCENARIO_A: [u8; 13] = hex!("91 CF 11 22 10 F4 7D E9 81 15 CD 14 E9");

    #[test]
    fn test_parse_scenario() {
        let schema = scenario_schema();
        let decoded = MessageParser::new(&schema).parse(&SCENARIO_A).unwrap();

        assert_eq!(decoded.get_as::<u64>("value").unwrap(), 1234567890123456789);
        assert_eq!(decoded.checksum(), Some(0x14E9));
        assert_eq!(decoded.len(), 13);
        assert_eq!(decoded.fields()[0].name(), "value");
    }

    #[test]
    fn test_corruption_rejected() {
        let schema = scenario_schema();
        let parser = MessageParser::new(&schema);

        let mut corrupted = SCENARIO_A;
        corrupted[5] ^= 0x40;
        assert!(matches!(
            parser.parse(&corrupted),
            Err(CodecError::ChecksumMismatch { expected: 0x14E9, .. })
        ));
    }

    #[test]
    fn test_length_rules() {
        let schema = scenario_schema();
        let parser = MessageParser::new(&schema);

        assert!(matches!(
            parser.parse(&SCENARIO_A[..12]),
            Err(CodecError::Truncated { need: 13, available: 12, .. })
        ));

        let mut padded = SCENARIO_A.to_vec();
        padded.push(0x00);
        assert!(matches!(
            parser.parse(&padded),
            Err(CodecError::TrailingBytes { consumed: 13, total: 14 })
        ));

        let lenient = CodecConfig {
            decode: DecodePolicy {
                allow_trailing_bytes: true,
                ..DecodePolicy::default()
            },
            ..CodecConfig::default()
        };
        let decoded = MessageParser::with_config(&schema, lenient).parse(&padded).unwrap();
        assert_eq!(decoded.len(), 13);
    }

    #[test]
    fn test_size_limit() {
        let schema = scenario_schema();
        let config = CodecConfig {
            max_message_size: Some(12),
            ..CodecConfig::default()
        };
        assert!(matches!(
            MessageParser::with_config(&schema, config).parse(&SCENARIO_A),
            Err(CodecError::MessageTooLarge { size: 13, max: 12 })
        ));
    }

    #[test]
    fn test_checksum_verification_can_be_disabled() {
        let schema = scenario_schema();
        let config = CodecConfig {
            decode: DecodePolicy {
                verify_checksum: false,
                ..DecodePolicy::default()
            },
            ..CodecConfig::default()
        };
        let parser = MessageParser::with_config(&schema, config);

        let mut stale = SCENARIO_A;
        stale[12] = 0x00;
        let decoded = parser.parse(&stale).unwrap();
        assert_eq!(decoded.checksum(), Some(0x1400));

        // the trailer still has to be a uint16
        stale[10] = 0xCC;
        assert!(matches!(parser.parse(&stale), Err(CodecError::TagMismatch { offset: 10, .. })));
    }

    #[test]
    fn test_header_must_match_schema() {
        let schema = scenario_schema();
        let mut wrong_count = SCENARIO_A;
        wrong_count[0] = 0x92;
        assert!(matches!(
            MessageParser::new(&schema).parse(&wrong_count),
            Err(CodecError::CountMismatch { expected: 1, actual: 2, .. })
        ));
    }

    #[test]
    fn test_non_minimal_header_accepted() {
        let schema = MessageSchema::new(
            "Flags",
            1,
            vec![FieldSpec::repeated("bits", PrimitiveKind::Bool, 2).unwrap()],
            false,
        )
        .unwrap();
        let decoded = MessageParser::new(&schema).parse(&hex!("DC 00 02 C3 C2")).unwrap();
        assert_eq!(decoded.get_many_as::<bool>("bits").unwrap(), [true, false]);
    }

    #[test]
    fn test_typed_getters() {
        let schema = MessageSchema::new(
            "Mixed",
            1,
            vec![
                FieldSpec::new("id", PrimitiveKind::Uint16).unwrap(),
                FieldSpec::repeated("samples", PrimitiveKind::Float32, 3).unwrap(),
            ],
            false,
        )
        .unwrap();
        let mut builder = MessageBuilder::new(&schema);
        builder.set("id", 42_000u16).unwrap();
        builder.set_many("samples", &[0.5f32, 1.5, 2.5]).unwrap();
        let bytes = builder.build().unwrap();

        let decoded = MessageParser::new(&schema).parse(&bytes).unwrap();
        assert_eq!(decoded.get_as::<u16>("id").unwrap(), 42_000);
        assert_eq!(decoded.get_many_as::<f32>("samples").unwrap(), [0.5, 1.5, 2.5]);
        assert_eq!(decoded.get("samples").unwrap().values().len(), 3);
        assert_eq!(decoded.checksum(), None);

        assert!(matches!(
            decoded.get_as::<f32>("samples"),
            Err(CodecError::ElementCountMismatch { expected: 1, actual: 3, .. })
        ));
        assert!(matches!(
            decoded.get_as::<u32>("id"),
            Err(CodecError::KindMismatch { .. })
        ));
        assert!(matches!(
            decoded.get_as::<u16>("missing"),
            Err(CodecError::UnknownField { .. })
        ));
    }
}
