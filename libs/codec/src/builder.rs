//! # Schema-Driven Message Builder
//!
//! ## Purpose
//!
//! Builds a complete message from a [`MessageSchema`] known only at run
//! time: values are set by field name, checked against the field's kind and
//! repeat count, then written in schema order behind one array header.
//!
//! ## Architecture
//!
//! ```text
//! set("robot_id", 7u16) ─┐
//! set_many("distance", ..)├→ [MessageBuilder] → WireWriter → bytes
//! set_values("angle", ..) ┘        ↓
//!                          header, fields, trailer
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use codec::MessageBuilder;
//! use microbuf_types::{FieldSpec, MessageSchema, PrimitiveKind};
//!
//! let schema = MessageSchema::new(
//!     "Ping",
//!     1,
//!     vec![FieldSpec::new("id", PrimitiveKind::Uint64).unwrap()],
//!     true,
//! )
//! .unwrap();
//!
//! let mut builder = MessageBuilder::new(&schema);
//! builder.set("id", 1234567890123456789u64).unwrap();
//! let bytes = builder.build().unwrap();
//! assert_eq!(bytes.len(), schema.encoded_size());
//! assert_eq!(&bytes[10..], [0xCD, 0x14, 0xE9]);
//! ```

use microbuf_types::{FieldSpec, MessageSchema, PrimitiveValue};
use tracing::debug;

use crate::array::ArrayLength;
use crate::buffers::GrowableBuffer;
use crate::cursor::{SliceWriter, WireWriter};
use crate::error::{CodecError, CodecResult};
use crate::primitive::Primitive;

/// Collects field values for one message and encodes them in schema order
#[derive(Debug, Clone)]
pub struct MessageBuilder<'s> {
    schema: &'s MessageSchema,
    values: Vec<Option<Vec<PrimitiveValue>>>,
}

impl<'s> MessageBuilder<'s> {
    pub fn new(schema: &'s MessageSchema) -> Self {
        Self {
            schema,
            values: vec![None; schema.fields().len()],
        }
    }

    pub fn schema(&self) -> &'s MessageSchema {
        self.schema
    }

    /// Set a scalar field
    pub fn set<T: Primitive>(&mut self, name: &str, value: T) -> CodecResult<&mut Self> {
        self.set_values(name, vec![value.into_value()])
    }

    /// Set every element of a repeated field
    pub fn set_many<T: Primitive>(&mut self, name: &str, values: &[T]) -> CodecResult<&mut Self> {
        self.set_values(name, values.iter().map(|v| v.into_value()).collect())
    }

    /// Set a field from dynamically typed values
    ///
    /// Every value must have the field's kind and there must be exactly as
    /// many as the field's repeat count. A rejected call leaves any earlier
    /// value of the field in place.
    pub fn set_values(
        &mut self,
        name: &str,
        values: Vec<PrimitiveValue>,
    ) -> CodecResult<&mut Self> {
        let (index, spec) = self.lookup(name)?;

        if values.len() != spec.count() as usize {
            return Err(CodecError::ElementCountMismatch {
                field: name.to_string(),
                expected: spec.count(),
                actual: values.len(),
            });
        }
        if let Some(wrong) = values.iter().find(|v| v.kind() != spec.kind()) {
            return Err(CodecError::KindMismatch {
                field: name.to_string(),
                expected: spec.kind(),
                actual: wrong.kind(),
            });
        }

        self.values[index] = Some(values);
        Ok(self)
    }

    /// Whether every field has a value
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Size of the message [`build`](Self::build) will produce
    pub fn encoded_size(&self) -> usize {
        self.schema.encoded_size()
    }

    /// Encode into a new vector
    pub fn build(&self) -> CodecResult<Vec<u8>> {
        let mut buffer = GrowableBuffer::for_schema(self.schema);
        self.write_to(&mut buffer)?;
        Ok(buffer.into_vec())
    }

    /// Encode into `out`, returning the number of bytes written
    pub fn build_into(&self, out: &mut [u8]) -> CodecResult<usize> {
        let needed = self.encoded_size();
        if out.len() < needed {
            return Err(CodecError::BufferTooSmall {
                need: needed,
                got: out.len(),
                context: "message build",
            });
        }
        let mut writer = SliceWriter::new(out);
        self.write_to(&mut writer)
    }

    /// Encode through any writer, returning the number of bytes written
    ///
    /// Nothing is written unless every field has a value and the writer
    /// has room for the whole message.
    pub fn write_to<W: WireWriter>(&self, writer: &mut W) -> CodecResult<usize> {
        let fields = self.complete_fields()?;
        writer.ensure_capacity(self.schema.encoded_size())?;
        let start = writer.position();

        writer.put_array_header(ArrayLength::from(self.schema.header_count()))?;
        for values in fields {
            for &value in values {
                writer.put_value(value)?;
            }
        }
        let checksum = if self.schema.append_checksum() {
            Some(writer.put_trailer(start)?)
        } else {
            None
        };

        let written = &writer.written()[start..];
        debug!(
            message = self.schema.name(),
            len = written.len(),
            checksum = ?checksum,
            bytes = %hex::encode(written),
            "Built message"
        );
        Ok(written.len())
    }

    fn lookup(&self, name: &str) -> CodecResult<(usize, &'s FieldSpec)> {
        self.schema
            .field(name)
            .ok_or_else(|| CodecError::UnknownField {
                field: name.to_string(),
                message: self.schema.name().to_string(),
            })
    }

    fn complete_fields(&self) -> CodecResult<Vec<&[PrimitiveValue]>> {
        self.schema
            .fields()
            .iter()
            .zip(&self.values)
            .map(|(spec, values)| match values {
                Some(values) => Ok(values.as_slice()),
                None => Err(CodecError::MissingField {
                    field: spec.name().to_string(),
                }),
            })
            .collect()
    }
}
