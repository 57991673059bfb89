//! Primitive kinds and dynamically typed primitive values
//!
//! [`PrimitiveKind`] is the schema-level name of a wire type; it knows its
//! tag(s) and encoded width. [`PrimitiveValue`] carries one value of any kind
//! for schema-driven code that does not know field types at compile time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::errors::SchemaError;
use crate::protocol::constants::*;

/// Supported primitive wire types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Bool,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
}

impl PrimitiveKind {
    /// Every supported kind, in tag-table order
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Uint8,
        PrimitiveKind::Uint16,
        PrimitiveKind::Uint32,
        PrimitiveKind::Uint64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
    ];

    /// Schema name, as written in `.mmsg` files
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Uint8 => "uint8",
            PrimitiveKind::Uint16 => "uint16",
            PrimitiveKind::Uint32 => "uint32",
            PrimitiveKind::Uint64 => "uint64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
        }
    }

    /// Bytes after the tag (bool carries its value in the tag itself)
    pub const fn payload_len(self) -> usize {
        match self {
            PrimitiveKind::Bool => 0,
            PrimitiveKind::Uint8 => 1,
            PrimitiveKind::Uint16 => 2,
            PrimitiveKind::Uint32 | PrimitiveKind::Float32 => 4,
            PrimitiveKind::Uint64 | PrimitiveKind::Float64 => 8,
        }
    }

    /// Tag plus payload
    pub const fn encoded_len(self) -> usize {
        1 + self.payload_len()
    }

    /// Whether `tag` is a valid leading byte for this kind
    pub const fn accepts_tag(self, tag: u8) -> bool {
        match self {
            PrimitiveKind::Bool => tag == TAG_TRUE || tag == TAG_FALSE,
            PrimitiveKind::Uint8 => tag == TAG_UINT8,
            PrimitiveKind::Uint16 => tag == TAG_UINT16,
            PrimitiveKind::Uint32 => tag == TAG_UINT32,
            PrimitiveKind::Uint64 => tag == TAG_UINT64,
            PrimitiveKind::Float32 => tag == TAG_FLOAT32,
            PrimitiveKind::Float64 => tag == TAG_FLOAT64,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimitiveKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SchemaError::UnsupportedType {
                field: String::new(),
                type_name: s.to_string(),
            })
    }
}

/// One primitive value of any supported kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveValue {
    Bool(bool),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
}

impl PrimitiveValue {
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveValue::Bool(_) => PrimitiveKind::Bool,
            PrimitiveValue::Uint8(_) => PrimitiveKind::Uint8,
            PrimitiveValue::Uint16(_) => PrimitiveKind::Uint16,
            PrimitiveValue::Uint32(_) => PrimitiveKind::Uint32,
            PrimitiveValue::Uint64(_) => PrimitiveKind::Uint64,
            PrimitiveValue::Float32(_) => PrimitiveKind::Float32,
            PrimitiveValue::Float64(_) => PrimitiveKind::Float64,
        }
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveValue::Bool(v) => write!(f, "{v}"),
            PrimitiveValue::Uint8(v) => write!(f, "{v}u8"),
            PrimitiveValue::Uint16(v) => write!(f, "{v}u16"),
            PrimitiveValue::Uint32(v) => write!(f, "{v}u32"),
            PrimitiveValue::Uint64(v) => write!(f, "{v}u64"),
            PrimitiveValue::Float32(v) => write!(f, "{v}f32"),
            PrimitiveValue::Float64(v) => write!(f, "{v}f64"),
        }
    }
}

macro_rules! impl_from_native {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$native> for PrimitiveValue {
                fn from(value: $native) -> Self {
                    PrimitiveValue::$variant(value)
                }
            }
        )*
    };
}

impl_from_native! {
    bool => Bool,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
}
