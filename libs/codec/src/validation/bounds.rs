//! Bounds Checking for Safe Memory Operations
//!
//! Runtime checks for dynamically sized buffers, plus compile-time checks for
//! fixed-capacity buffers where every offset is a constant. A compile-time
//! check is an associated `const OK: ()` that fails to evaluate when the
//! layout does not fit; forcing it with `let () = FitsAt::<..>::OK;` turns an
//! out-of-range write into a build error instead of a runtime one.

use std::marker::PhantomData;

use microbuf_types::{array_header_len, TRAILER_LEN};

use crate::array::ArrayLength;
use crate::error::{CodecError, CodecResult};
use crate::primitive::Primitive;

/// Check that `size` bytes can be read from `buffer` at `offset`
#[inline]
pub fn check_buffer_bounds(
    buffer: &[u8],
    offset: usize,
    size: usize,
    context: &'static str,
) -> CodecResult<()> {
    if offset.saturating_add(size) > buffer.len() {
        return Err(CodecError::truncated(buffer.len(), offset, size, context));
    }
    Ok(())
}

/// Read-side slice with bounds checking
#[inline]
pub fn safe_slice<'a>(
    buffer: &'a [u8],
    offset: usize,
    size: usize,
    context: &'static str,
) -> CodecResult<&'a [u8]> {
    check_buffer_bounds(buffer, offset, size, context)?;
    Ok(&buffer[offset..offset + size])
}

/// Write-side slice with bounds checking
#[inline]
pub fn safe_slice_mut<'a>(
    buffer: &'a mut [u8],
    offset: usize,
    size: usize,
    context: &'static str,
) -> CodecResult<&'a mut [u8]> {
    if offset.saturating_add(size) > buffer.len() {
        return Err(CodecError::BufferTooSmall {
            need: offset.saturating_add(size),
            got: buffer.len(),
            context,
        });
    }
    Ok(&mut buffer[offset..offset + size])
}

/// Primitive `T` written at `OFFSET` fits in an `N`-byte buffer
pub struct FitsAt<T, const OFFSET: usize, const N: usize>(PhantomData<T>);

impl<T: Primitive, const OFFSET: usize, const N: usize> FitsAt<T, OFFSET, N> {
    pub const OK: () = assert!(
        OFFSET + T::ENCODED_LEN <= N,
        "primitive does not fit in fixed buffer at this offset"
    );
}

/// `COUNT` consecutive `T` elements starting at `OFFSET` fit in `N` bytes
pub struct RunFitsAt<T, const OFFSET: usize, const COUNT: usize, const N: usize>(PhantomData<T>);

impl<T: Primitive, const OFFSET: usize, const COUNT: usize, const N: usize>
    RunFitsAt<T, OFFSET, COUNT, N>
{
    pub const OK: () = {
        assert!(COUNT > 0, "repeated run must hold at least one element");
        assert!(
            OFFSET + COUNT * T::ENCODED_LEN <= N,
            "repeated run does not fit in fixed buffer at this offset"
        );
    };
}

/// Array header for `COUNT` elements at `OFFSET` fits in `N` bytes
pub struct HeaderFitsAt<const OFFSET: usize, const COUNT: u32, const N: usize>;

impl<const OFFSET: usize, const COUNT: u32, const N: usize> HeaderFitsAt<OFFSET, COUNT, N> {
    pub const OK: () = assert!(
        OFFSET + array_header_len(COUNT) <= N,
        "array header does not fit in fixed buffer at this offset"
    );

    /// `COUNT` as a length; zero fails to compile
    pub const LENGTH: ArrayLength = match ArrayLength::new(COUNT) {
        Some(length) => length,
        None => panic!("array header count must be at least one"),
    };
}

/// `N`-byte buffer has room for a trailer after at least one covered byte
pub struct HasTrailer<const N: usize>;

impl<const N: usize> HasTrailer<N> {
    pub const OK: () = assert!(
        N > TRAILER_LEN,
        "buffer too small to hold covered bytes and a checksum trailer"
    );
}

/// Fixed buffers with zero capacity are rejected
pub struct NonEmpty<const N: usize>;

impl<const N: usize> NonEmpty<N> {
    pub const OK: () = assert!(N > 0, "fixed buffer capacity must be non-zero");
}
