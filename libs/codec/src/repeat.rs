//! # Homogeneous Repeater
//!
//! A repeated field is its elements encoded back to back, each with its own
//! tag, and no array header of its own. The element count comes from the
//! schema, never from the wire.
//!
//! ```text
//! uint16[3] = [1, 2, 300]  →  CD 00 01 | CD 00 02 | CD 01 2C
//! ```

use crate::error::{CodecError, CodecResult};
use crate::primitive::{self, decode_at, Primitive};
use crate::validation::bounds::{check_buffer_bounds, safe_slice_mut};

/// Append every value in order, returning bytes written
///
/// An empty run is rejected; repeated fields hold at least one element.
pub fn encode_many<T: Primitive>(out: &mut Vec<u8>, values: &[T]) -> CodecResult<usize> {
    if values.is_empty() {
        return Err(CodecError::ZeroLength {
            context: "repeated run",
        });
    }
    out.reserve(values.len() * T::ENCODED_LEN);
    for &value in values {
        primitive::append(out, value);
    }
    Ok(values.len() * T::ENCODED_LEN)
}

/// Write every value starting at `offset`, returning the offset past the run
///
/// The whole run is bounds-checked before the first byte is written.
pub fn write_many<T: Primitive>(buf: &mut [u8], offset: usize, values: &[T]) -> CodecResult<usize> {
    if values.is_empty() {
        return Err(CodecError::ZeroLength {
            context: "repeated run",
        });
    }
    let run = safe_slice_mut(buf, offset, values.len() * T::ENCODED_LEN, "repeated run write")?;
    for (slot, &value) in run.chunks_exact_mut(T::ENCODED_LEN).zip(values) {
        slot.copy_from_slice(&primitive::encode(value));
    }
    Ok(offset + values.len() * T::ENCODED_LEN)
}

/// Decode `N` consecutive values starting at `offset`
///
/// Returns the values and the offset past the run. The first failing
/// element aborts the decode and nothing is returned.
pub fn decode_many<T: Primitive, const N: usize>(
    buf: &[u8],
    offset: usize,
) -> CodecResult<([T; N], usize)> {
    let mut values = [T::default(); N];
    let next = decode_many_into(buf, offset, &mut values)?;
    Ok((values, next))
}

/// Decode `out.len()` consecutive values into `out`
///
/// Every tag is validated before `out` is touched, so on failure `out` keeps
/// its previous contents.
pub fn decode_many_into<T: Primitive>(buf: &[u8], offset: usize, out: &mut [T]) -> CodecResult<usize> {
    if out.is_empty() {
        return Err(CodecError::ZeroLength {
            context: "repeated run",
        });
    }
    let run_len = out.len() * T::ENCODED_LEN;
    check_buffer_bounds(buf, offset, run_len, "repeated run")?;

    for index in 0..out.len() {
        let at = offset + index * T::ENCODED_LEN;
        if !T::KIND.accepts_tag(buf[at]) {
            return Err(CodecError::tag_mismatch(at, T::KIND.name(), buf[at]));
        }
    }
    for (index, slot) in out.iter_mut().enumerate() {
        *slot = decode_at(buf, offset + index * T::ENCODED_LEN)?;
    }
    Ok(offset + run_len)
}
