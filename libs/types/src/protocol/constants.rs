//! Protocol constants and encoded widths
//!
//! The byte values here are the wire format. They must never change and no
//! value may carry two meanings.

/// Base of the fixarray range; the low nibble carries the count (1..=15)
pub const FIXARRAY_BASE: u8 = 0x90;

/// Mask selecting the fixarray bit pattern from a header byte
pub const FIXARRAY_MASK: u8 = 0xF0;

/// Marker byte of the array16 header form
pub const ARRAY16_MARKER: u8 = 0xDC;

/// Marker byte of the array32 header form
pub const ARRAY32_MARKER: u8 = 0xDD;

pub const TAG_FLOAT32: u8 = 0xCA;
pub const TAG_FLOAT64: u8 = 0xCB;
pub const TAG_FALSE: u8 = 0xC2;
pub const TAG_TRUE: u8 = 0xC3;
pub const TAG_UINT8: u8 = 0xCC;
pub const TAG_UINT16: u8 = 0xCD;
pub const TAG_UINT32: u8 = 0xCE;
pub const TAG_UINT64: u8 = 0xCF;

/// Largest count representable in the one-byte fixarray form
pub const FIXARRAY_MAX_COUNT: u32 = 15;

/// Largest count representable in the array16 form
pub const ARRAY16_MAX_COUNT: u32 = 65_535;

pub const FIXARRAY_HEADER_LEN: usize = 1;
pub const ARRAY16_HEADER_LEN: usize = 3;
pub const ARRAY32_HEADER_LEN: usize = 5;

pub const BOOL_ENCODED_LEN: usize = 1;
pub const UINT8_ENCODED_LEN: usize = 2;
pub const UINT16_ENCODED_LEN: usize = 3;
pub const UINT32_ENCODED_LEN: usize = 5;
pub const UINT64_ENCODED_LEN: usize = 9;
pub const FLOAT32_ENCODED_LEN: usize = 5;
pub const FLOAT64_ENCODED_LEN: usize = 9;

/// Widest encoded primitive (uint64 / float64)
pub const MAX_PRIMITIVE_ENCODED_LEN: usize = 9;

/// Integrity trailer: one uint16 tag byte plus two checksum bytes
pub const TRAILER_LEN: usize = UINT16_ENCODED_LEN;

/// Returns true when `byte` lies in the fixarray range 0x90..=0x9F
#[inline]
pub const fn is_fixarray(byte: u8) -> bool {
    byte & FIXARRAY_MASK == FIXARRAY_BASE
}

/// Encoded width of the array header that frames `count` elements
///
/// Usable in const contexts so fixed-capacity buffers can size themselves
/// from a schema at compile time. A zero count has no valid header; callers
/// reject it before asking for a width.
#[inline]
pub const fn array_header_len(count: u32) -> usize {
    if count <= FIXARRAY_MAX_COUNT {
        FIXARRAY_HEADER_LEN
    } else if count <= ARRAY16_MAX_COUNT {
        ARRAY16_HEADER_LEN
    } else {
        ARRAY32_HEADER_LEN
    }
}
