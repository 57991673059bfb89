//! # Array-Length Framer
//!
//! Encodes an element count as the shortest of three header forms:
//!
//! | Count            | Header                              | Width |
//! |------------------|-------------------------------------|-------|
//! | 1 ..= 15         | `0x90 \| count`                     | 1     |
//! | 16 ..= 65535     | `0xDC` + 2-byte canonical count     | 3     |
//! | 65536 ..= 2^32-1 | `0xDD` + 4-byte canonical count     | 5     |
//!
//! Zero has no encoding: [`ArrayLength`] wraps a `NonZeroU32`, so an empty
//! array cannot reach the encoder, and a decoded count of zero is rejected as
//! invalid wire data. Non-minimal forms (an array16 carrying 3) decode fine.

use std::fmt;
use std::num::NonZeroU32;

use microbuf_types::{
    is_fixarray, WireTag, ARRAY16_HEADER_LEN, ARRAY16_MARKER, ARRAY16_MAX_COUNT,
    ARRAY32_HEADER_LEN, ARRAY32_MARKER, FIXARRAY_BASE, FIXARRAY_HEADER_LEN, FIXARRAY_MAX_COUNT,
    MAX_PRIMITIVE_ENCODED_LEN,
};

use crate::canonical::Canonical;
use crate::error::{CodecError, CodecResult};
use crate::primitive::Encoded;
use crate::validation::bounds::{check_buffer_bounds, safe_slice_mut};

/// Number of elements framed by an array header, always at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArrayLength(NonZeroU32);

impl ArrayLength {
    pub const ONE: ArrayLength = ArrayLength(NonZeroU32::MIN);

    /// `None` for zero
    pub const fn new(count: u32) -> Option<Self> {
        match NonZeroU32::new(count) {
            Some(count) => Some(Self(count)),
            None => None,
        }
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Header form this count encodes with
    pub const fn form(self) -> ArrayForm {
        let count = self.0.get();
        if count <= FIXARRAY_MAX_COUNT {
            ArrayForm::FixArray
        } else if count <= ARRAY16_MAX_COUNT {
            ArrayForm::Array16
        } else {
            ArrayForm::Array32
        }
    }

    pub const fn encoded_len(self) -> usize {
        self.form().header_len()
    }
}

impl TryFrom<u32> for ArrayLength {
    type Error = CodecError;

    fn try_from(count: u32) -> CodecResult<Self> {
        Self::new(count).ok_or(CodecError::ZeroLength {
            context: "array length",
        })
    }
}

impl TryFrom<usize> for ArrayLength {
    type Error = CodecError;

    fn try_from(count: usize) -> CodecResult<Self> {
        let count = u32::try_from(count).map_err(|_| CodecError::LengthOverflow {
            count: count as u64,
        })?;
        Self::try_from(count)
    }
}

impl From<ArrayLength> for u32 {
    fn from(length: ArrayLength) -> u32 {
        length.get()
    }
}

impl From<NonZeroU32> for ArrayLength {
    fn from(count: NonZeroU32) -> Self {
        Self(count)
    }
}

impl fmt::Display for ArrayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Header form selected by count range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayForm {
    FixArray,
    Array16,
    Array32,
}

impl ArrayForm {
    pub const fn header_len(self) -> usize {
        match self {
            ArrayForm::FixArray => FIXARRAY_HEADER_LEN,
            ArrayForm::Array16 => ARRAY16_HEADER_LEN,
            ArrayForm::Array32 => ARRAY32_HEADER_LEN,
        }
    }
}

/// Encode the shortest header for `length`
pub fn encode_array_header(length: ArrayLength) -> Encoded {
    let mut bytes = [0u8; MAX_PRIMITIVE_ENCODED_LEN];
    let count = length.get();
    match length.form() {
        // count <= 15 here, so the cast keeps every bit
        ArrayForm::FixArray => bytes[0] = FIXARRAY_BASE | count as u8,
        ArrayForm::Array16 => {
            bytes[0] = ARRAY16_MARKER;
            (count as u16).write_canonical(&mut bytes[1..ARRAY16_HEADER_LEN]);
        }
        ArrayForm::Array32 => {
            bytes[0] = ARRAY32_MARKER;
            count.write_canonical(&mut bytes[1..ARRAY32_HEADER_LEN]);
        }
    }
    Encoded::from_parts(bytes, length.encoded_len())
}

/// Append a header to a growable buffer, returning bytes written
pub fn append_array_header(out: &mut Vec<u8>, length: ArrayLength) -> usize {
    let header = encode_array_header(length);
    out.extend_from_slice(&header);
    header.len()
}

/// Write a header at `offset`, returning the offset just past it
pub fn write_array_header(buf: &mut [u8], offset: usize, length: ArrayLength) -> CodecResult<usize> {
    let header = encode_array_header(length);
    safe_slice_mut(buf, offset, header.len(), "array header write")?.copy_from_slice(&header);
    Ok(offset + header.len())
}

/// Decode the header at `offset`, returning the count and the offset past it
pub fn decode_array_header(buf: &[u8], offset: usize) -> CodecResult<(ArrayLength, usize)> {
    check_buffer_bounds(buf, offset, 1, "array header")?;
    let marker = buf[offset];

    let (count, width) = if is_fixarray(marker) {
        (u32::from(marker & 0x0F), FIXARRAY_HEADER_LEN)
    } else if marker == ARRAY16_MARKER {
        check_buffer_bounds(buf, offset, ARRAY16_HEADER_LEN, "array16 header")?;
        (
            u32::from(u16::read_canonical(&buf[offset + 1..])),
            ARRAY16_HEADER_LEN,
        )
    } else if marker == ARRAY32_MARKER {
        check_buffer_bounds(buf, offset, ARRAY32_HEADER_LEN, "array32 header")?;
        (u32::read_canonical(&buf[offset + 1..]), ARRAY32_HEADER_LEN)
    } else {
        return Err(CodecError::InvalidArrayHeader {
            offset,
            byte: marker,
            byte_name: WireTag::describe(marker),
        });
    };

    let length = ArrayLength::new(count).ok_or(CodecError::ZeroLength {
        context: "decoded array header",
    })?;
    Ok((length, offset + width))
}

/// Decode the header at `offset` and require it to carry `expected`
pub fn expect_array_header(buf: &[u8], offset: usize, expected: ArrayLength) -> CodecResult<usize> {
    let (actual, next) = decode_array_header(buf, offset)?;
    if actual != expected {
        return Err(CodecError::CountMismatch {
            offset,
            expected: expected.get(),
            actual: actual.get(),
        });
    }
    Ok(next)
}
