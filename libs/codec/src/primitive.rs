//! # Primitive Tag Codec
//!
//! Encodes one primitive as its wire tag followed by its canonical payload,
//! and decodes it back after checking the tag. Booleans have no payload: the
//! tag itself (`0xC3` / `0xC2`) is the value.
//!
//! ## Wire Forms
//!
//! ```text
//! bool    [C2|C3]                    1 byte
//! uint8   [CC] [b0]                  2 bytes
//! uint16  [CD] [b1 b0]               3 bytes
//! uint32  [CE] [b3 .. b0]            5 bytes
//! uint64  [CF] [b7 .. b0]            9 bytes
//! float32 [CA] [IEEE-754 bits]       5 bytes
//! float64 [CB] [IEEE-754 bits]       9 bytes
//! ```
//!
//! Decoding never reads past the input: a short buffer is a
//! [`CodecError::Truncated`], and a wrong tag is a [`CodecError::TagMismatch`]
//! with no value produced.

use std::fmt;
use std::ops::Deref;

use microbuf_types::{PrimitiveKind, PrimitiveValue, MAX_PRIMITIVE_ENCODED_LEN, TAG_FALSE, TAG_TRUE};

use crate::canonical::Canonical;
use crate::error::{CodecError, CodecResult};
use crate::validation::bounds::{check_buffer_bounds, safe_slice_mut};

mod sealed {
    pub trait Sealed {}
}

/// Native Rust type with a microbuf wire form
///
/// Implemented for `bool`, `u8`, `u16`, `u32`, `u64`, `f32` and `f64`; the
/// set is closed.
pub trait Primitive: sealed::Sealed + Copy + Default + PartialEq + fmt::Debug {
    /// Schema-level kind
    const KIND: PrimitiveKind;

    /// Tag plus payload width
    const ENCODED_LEN: usize = Self::KIND.encoded_len();

    /// Tag byte this value is written with
    fn tag(self) -> u8;

    /// Write the payload (everything after the tag) into `payload`
    fn write_payload(self, payload: &mut [u8]);

    /// Rebuild a value from an accepted tag and its payload
    fn read_payload(tag: u8, payload: &[u8]) -> Self;

    fn into_value(self) -> PrimitiveValue;

    fn from_value(value: PrimitiveValue) -> Option<Self>;
}

impl sealed::Sealed for bool {}

impl Primitive for bool {
    const KIND: PrimitiveKind = PrimitiveKind::Bool;

    #[inline]
    fn tag(self) -> u8 {
        if self {
            TAG_TRUE
        } else {
            TAG_FALSE
        }
    }

    #[inline]
    fn write_payload(self, _payload: &mut [u8]) {}

    #[inline]
    fn read_payload(tag: u8, _payload: &[u8]) -> Self {
        tag == TAG_TRUE
    }

    fn into_value(self) -> PrimitiveValue {
        PrimitiveValue::Bool(self)
    }

    fn from_value(value: PrimitiveValue) -> Option<Self> {
        match value {
            PrimitiveValue::Bool(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! impl_canonical_primitive {
    ($($native:ty => $kind:ident, $tag:path, $variant:ident;)*) => {
        $(
            impl sealed::Sealed for $native {}

            impl Primitive for $native {
                const KIND: PrimitiveKind = PrimitiveKind::$kind;

                #[inline]
                fn tag(self) -> u8 {
                    $tag
                }

                #[inline]
                fn write_payload(self, payload: &mut [u8]) {
                    self.write_canonical(payload);
                }

                #[inline]
                fn read_payload(_tag: u8, payload: &[u8]) -> Self {
                    <$native>::read_canonical(payload)
                }

                fn into_value(self) -> PrimitiveValue {
                    PrimitiveValue::$variant(self)
                }

                fn from_value(value: PrimitiveValue) -> Option<Self> {
                    match value {
                        PrimitiveValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_canonical_primitive! {
    u8 => Uint8, microbuf_types::TAG_UINT8, Uint8;
    u16 => Uint16, microbuf_types::TAG_UINT16, Uint16;
    u32 => Uint32, microbuf_types::TAG_UINT32, Uint32;
    u64 => Uint64, microbuf_types::TAG_UINT64, Uint64;
    f32 => Float32, microbuf_types::TAG_FLOAT32, Float32;
    f64 => Float64, microbuf_types::TAG_FLOAT64, Float64;
}

/// Stack-allocated encoding of one primitive or array header
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    bytes: [u8; MAX_PRIMITIVE_ENCODED_LEN],
    len: usize,
}

impl Encoded {
    pub(crate) fn from_parts(bytes: [u8; MAX_PRIMITIVE_ENCODED_LEN], len: usize) -> Self {
        debug_assert!(len <= MAX_PRIMITIVE_ENCODED_LEN);
        Self { bytes, len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl Deref for Encoded {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Encoded {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Encoded({})", hex::encode(self.as_bytes()))
    }
}

/// Encode `value` as tag plus canonical payload
#[inline]
pub fn encode<T: Primitive>(value: T) -> Encoded {
    let mut bytes = [0u8; MAX_PRIMITIVE_ENCODED_LEN];
    bytes[0] = value.tag();
    value.write_payload(&mut bytes[1..T::ENCODED_LEN]);
    Encoded::from_parts(bytes, T::ENCODED_LEN)
}

/// Append the encoding of `value` to a growable buffer, returning bytes written
pub fn append<T: Primitive>(out: &mut Vec<u8>, value: T) -> usize {
    out.extend_from_slice(&encode(value));
    T::ENCODED_LEN
}

/// Write `value` at `offset`, returning the offset just past it
pub fn write_at<T: Primitive>(buf: &mut [u8], offset: usize, value: T) -> CodecResult<usize> {
    let slot = safe_slice_mut(buf, offset, T::ENCODED_LEN, "primitive write")?;
    slot.copy_from_slice(&encode(value));
    Ok(offset + T::ENCODED_LEN)
}

/// Decode a `T` whose tag byte sits at `offset`
///
/// The tag is checked before the payload is touched; on any failure no value
/// is produced.
pub fn decode_at<T: Primitive>(buf: &[u8], offset: usize) -> CodecResult<T> {
    check_buffer_bounds(buf, offset, 1, T::KIND.name())?;
    let tag = buf[offset];
    if !T::KIND.accepts_tag(tag) {
        return Err(CodecError::tag_mismatch(offset, T::KIND.name(), tag));
    }
    check_buffer_bounds(buf, offset, T::ENCODED_LEN, T::KIND.name())?;
    Ok(T::read_payload(tag, &buf[offset + 1..offset + T::ENCODED_LEN]))
}

/// Decode a `T` from the start of `bytes`
pub fn decode<T: Primitive>(bytes: &[u8]) -> CodecResult<T> {
    decode_at(bytes, 0)
}

/// Encode a dynamically typed value
pub fn encode_value(value: PrimitiveValue) -> Encoded {
    match value {
        PrimitiveValue::Bool(v) => encode(v),
        PrimitiveValue::Uint8(v) => encode(v),
        PrimitiveValue::Uint16(v) => encode(v),
        PrimitiveValue::Uint32(v) => encode(v),
        PrimitiveValue::Uint64(v) => encode(v),
        PrimitiveValue::Float32(v) => encode(v),
        PrimitiveValue::Float64(v) => encode(v),
    }
}

/// Decode a value of `kind` at `offset`
pub fn decode_value_at(kind: PrimitiveKind, buf: &[u8], offset: usize) -> CodecResult<PrimitiveValue> {
    Ok(match kind {
        PrimitiveKind::Bool => decode_at::<bool>(buf, offset)?.into_value(),
        PrimitiveKind::Uint8 => decode_at::<u8>(buf, offset)?.into_value(),
        PrimitiveKind::Uint16 => decode_at::<u16>(buf, offset)?.into_value(),
        PrimitiveKind::Uint32 => decode_at::<u32>(buf, offset)?.into_value(),
        PrimitiveKind::Uint64 => decode_at::<u64>(buf, offset)?.into_value(),
        PrimitiveKind::Float32 => decode_at::<f32>(buf, offset)?.into_value(),
        PrimitiveKind::Float64 => decode_at::<f64>(buf, offset)?.into_value(),
    })
}
