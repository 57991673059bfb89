//! Wire tag registry
//!
//! Every encoded value starts with one tag byte. Fixed tags map one-to-one to
//! a [`WireTag`]; the fixarray form is a range (0x91..=0x9F) whose low nibble
//! is the count, so it is classified separately with
//! [`is_fixarray`](super::constants::is_fixarray).

use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::constants::is_fixarray;

/// Fixed one-byte tags of the wire format
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum WireTag {
    Array16 = 0xDC,
    Array32 = 0xDD,
    Float32 = 0xCA,
    Float64 = 0xCB,
    False = 0xC2,
    True = 0xC3,
    Uint8 = 0xCC,
    Uint16 = 0xCD,
    Uint32 = 0xCE,
    Uint64 = 0xCF,
}

impl WireTag {
    /// Human-readable name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            WireTag::Array16 => "array16",
            WireTag::Array32 => "array32",
            WireTag::Float32 => "float32",
            WireTag::Float64 => "float64",
            WireTag::False => "false",
            WireTag::True => "true",
            WireTag::Uint8 => "uint8",
            WireTag::Uint16 => "uint16",
            WireTag::Uint32 => "uint32",
            WireTag::Uint64 => "uint64",
        }
    }

    /// True for the two array-length marker tags
    pub const fn is_array_marker(self) -> bool {
        matches!(self, WireTag::Array16 | WireTag::Array32)
    }

    /// Describe an arbitrary byte as it would be read in tag position
    ///
    /// Used when reporting a tag mismatch, so the message says what the byte
    /// actually is rather than only that it was wrong.
    pub fn describe(byte: u8) -> &'static str {
        if is_fixarray(byte) {
            return "fixarray";
        }
        match WireTag::try_from(byte) {
            Ok(tag) => tag.name(),
            Err(_) => "unknown",
        }
    }
}

impl std::fmt::Display for WireTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:#04x})", self.name(), u8::from(*self))
    }
}
