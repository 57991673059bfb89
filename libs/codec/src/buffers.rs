//! Buffer Model for Message Construction
//!
//! ## Purpose
//!
//! Two storage strategies for encoded messages that produce byte-identical
//! output for the same logical writes:
//!
//! - [`GrowableBuffer`]: starts empty, append-only, sized at run time. Used
//!   when the schema is only known at run time.
//! - [`FixedBuffer`]: capacity `N` fixed at compile time, never resized.
//!   Every write names its offset as a const generic, so an out-of-range
//!   write is a build error rather than a runtime failure.
//!
//! ## Fixed-Capacity Layout
//!
//! ```text
//! FixedBuffer<13>:
//!   put_array_header::<0, 1>   → [91]
//!   put::<u64, 1>              →    [CF 11 22 10 F4 7D E9 81 15]
//!   seal                       →                                [CD 14 E9]
//! ```
//!
//! An offset that does not fit fails to compile:
//!
//! ```compile_fail
//! use codec::FixedBuffer;
//!
//! let mut buf = FixedBuffer::<8>::new();
//! buf.put::<u64, 0>(1); // 9 bytes into 8
//! ```
//!
//! Neither buffer is shared; each is owned by the code building one message.

use std::fmt;
use std::ops::Deref;

use microbuf_types::{MessageSchema, TRAILER_LEN};

use crate::array::{encode_array_header, expect_array_header};
use crate::cursor::{SliceWriter, WireReader, WireWriter};
use crate::error::{CodecError, CodecResult};
use crate::primitive::{self, Primitive};
use crate::repeat::decode_many;
use crate::validation::bounds::{FitsAt, HasTrailer, HeaderFitsAt, NonEmpty, RunFitsAt};
use crate::validation::checksum::crc16_aug_ccitt;
use crate::validation::trailer::{check_trailer, push_trailer, verify_trailer};

/// Append-only buffer that grows as values are written
#[derive(Clone, Default, PartialEq, Eq)]
pub struct GrowableBuffer {
    bytes: Vec<u8>,
}

impl GrowableBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Empty buffer pre-sized for one message of `schema`
    pub fn for_schema(schema: &MessageSchema) -> Self {
        Self::with_capacity(schema.encoded_size())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Append a trailer covering everything written so far
    pub fn seal(&mut self) -> u16 {
        push_trailer(&mut self.bytes)
    }

    pub fn verify(&self) -> bool {
        verify_trailer(&self.bytes)
    }

    pub fn reader(&self) -> WireReader<'_> {
        WireReader::new(&self.bytes)
    }
}

impl WireWriter for GrowableBuffer {
    fn write_bytes(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.bytes.write_bytes(bytes)
    }

    fn written(&self) -> &[u8] {
        &self.bytes
    }

    fn ensure_capacity(&mut self, len: usize) -> CodecResult<()> {
        self.bytes.ensure_capacity(len)
    }
}

impl Deref for GrowableBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for GrowableBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<GrowableBuffer> for Vec<u8> {
    fn from(buffer: GrowableBuffer) -> Vec<u8> {
        buffer.bytes
    }
}

impl fmt::Debug for GrowableBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GrowableBuffer({})", hex::encode(&self.bytes))
    }
}

/// Compile-time sized buffer with const-checked offsets
///
/// Reads still check tags at run time; only bounds are settled at compile
/// time.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FixedBuffer<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> FixedBuffer<N> {
    pub const CAPACITY: usize = N;

    /// Zero-filled buffer
    pub const fn new() -> Self {
        let () = NonEmpty::<N>::OK;
        Self { bytes: [0u8; N] }
    }

    /// Adopt an existing byte array, typically a received message
    pub const fn from_bytes(bytes: [u8; N]) -> Self {
        let () = NonEmpty::<N>::OK;
        Self { bytes }
    }

    /// Copy a received message that must be exactly `N` bytes long
    pub fn from_slice(bytes: &[u8]) -> CodecResult<Self> {
        if bytes.len() < N {
            return Err(CodecError::truncated(bytes.len(), 0, N, "fixed buffer input"));
        }
        if bytes.len() > N {
            return Err(CodecError::TrailingBytes {
                consumed: N,
                total: bytes.len(),
            });
        }
        let mut buffer = Self::new();
        buffer.bytes.copy_from_slice(bytes);
        Ok(buffer)
    }

    pub const fn len(&self) -> usize {
        N
    }

    /// Always false; zero-capacity buffers do not compile
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    pub fn into_bytes(self) -> [u8; N] {
        self.bytes
    }

    /// Write `value` at `OFFSET`, returning the offset just past it
    pub fn put<T: Primitive, const OFFSET: usize>(&mut self, value: T) -> usize {
        let () = FitsAt::<T, OFFSET, N>::OK;
        self.bytes[OFFSET..OFFSET + T::ENCODED_LEN].copy_from_slice(&primitive::encode(value));
        OFFSET + T::ENCODED_LEN
    }

    /// Read the `T` whose tag sits at `OFFSET`
    pub fn get<T: Primitive, const OFFSET: usize>(&self) -> CodecResult<T> {
        let () = FitsAt::<T, OFFSET, N>::OK;
        primitive::decode_at(&self.bytes, OFFSET)
    }

    /// Write the array header for `COUNT` elements at `OFFSET`
    pub fn put_array_header<const OFFSET: usize, const COUNT: u32>(&mut self) -> usize {
        let () = HeaderFitsAt::<OFFSET, COUNT, N>::OK;
        let header = encode_array_header(HeaderFitsAt::<OFFSET, COUNT, N>::LENGTH);
        self.bytes[OFFSET..OFFSET + header.len()].copy_from_slice(&header);
        OFFSET + header.len()
    }

    /// Require an array header for `COUNT` elements at `OFFSET`
    pub fn expect_array_header<const OFFSET: usize, const COUNT: u32>(&self) -> CodecResult<usize> {
        let () = HeaderFitsAt::<OFFSET, COUNT, N>::OK;
        expect_array_header(&self.bytes, OFFSET, HeaderFitsAt::<OFFSET, COUNT, N>::LENGTH)
    }

    /// Write a repeated run of `COUNT` values starting at `OFFSET`
    pub fn put_many<T: Primitive, const OFFSET: usize, const COUNT: usize>(
        &mut self,
        values: &[T; COUNT],
    ) -> usize {
        let () = RunFitsAt::<T, OFFSET, COUNT, N>::OK;
        let run = &mut self.bytes[OFFSET..OFFSET + COUNT * T::ENCODED_LEN];
        for (slot, &value) in run.chunks_exact_mut(T::ENCODED_LEN).zip(values) {
            slot.copy_from_slice(&primitive::encode(value));
        }
        OFFSET + COUNT * T::ENCODED_LEN
    }

    /// Read a repeated run of `COUNT` values starting at `OFFSET`
    pub fn get_many<T: Primitive, const OFFSET: usize, const COUNT: usize>(
        &self,
    ) -> CodecResult<[T; COUNT]> {
        let () = RunFitsAt::<T, OFFSET, COUNT, N>::OK;
        decode_many::<T, COUNT>(&self.bytes, OFFSET).map(|(values, _)| values)
    }

    /// Write the trailer into the last three bytes, covering everything before
    pub fn seal(&mut self) -> u16 {
        let () = HasTrailer::<N>::OK;
        let covered = N - TRAILER_LEN;
        let crc = crc16_aug_ccitt(&self.bytes[..covered]);
        self.bytes[covered..].copy_from_slice(&primitive::encode(crc));
        crc
    }

    pub fn verify(&self) -> bool {
        verify_trailer(&self.bytes)
    }

    /// Verify the trailer with a detailed error on mismatch
    pub fn check(&self) -> CodecResult<u16> {
        check_trailer(&self.bytes)
    }

    /// Sequential writer over the whole buffer, starting at offset 0
    pub fn writer(&mut self) -> SliceWriter<'_> {
        SliceWriter::new(&mut self.bytes)
    }

    pub fn reader(&self) -> WireReader<'_> {
        WireReader::new(&self.bytes)
    }
}

impl<const N: usize> Default for FixedBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Deref for FixedBuffer<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBuffer<N> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize> fmt::Debug for FixedBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedBuffer<{}>({})", N, hex::encode(self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayLength;
    use hex_literal::hex;

    const SCENARIO_A: [u8; 13] = hex!("91 CF 11 22 10 F4 7D E9 81 15 CD 14 E9");

    #[test]
    fn test_fixed_scenario() {
        let mut buf = FixedBuffer::<13>::new();
        let next = buf.put_array_header::<0, 1>();
        assert_eq!(next, 1);
        let next = buf.put::<u64, 1>(1234567890123456789);
        assert_eq!(next, 10);
        assert_eq!(buf.seal(), 0x14E9);

        assert_eq!(buf.into_bytes(), SCENARIO_A);
        assert!(buf.verify());
        assert_eq!(buf.check().unwrap(), 0x14E9);
    }

    #[test]
    fn test_fixed_reads() {
        let buf = FixedBuffer::from_bytes(SCENARIO_A);
        assert_eq!(buf.expect_array_header::<0, 1>().unwrap(), 1);
        assert_eq!(buf.get::<u64, 1>().unwrap(), 1234567890123456789);
        assert!(matches!(buf.get::<u32, 1>(), Err(CodecError::TagMismatch { .. })));
        assert!(matches!(
            buf.expect_array_header::<0, 2>(),
            Err(CodecError::CountMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_growable_equals_fixed() {
        let mut grown = GrowableBuffer::new();
        grown.put_array_header(ArrayLength::ONE).unwrap();
        grown.put(1234567890123456789u64).unwrap();
        assert_eq!(grown.seal(), 0x14E9);

        let mut fixed = FixedBuffer::<13>::new();
        fixed.put_array_header::<0, 1>();
        fixed.put::<u64, 1>(1234567890123456789);
        fixed.seal();

        assert_eq!(grown.as_bytes(), fixed.as_bytes());
        assert!(grown.verify());
    }

    #[test]
    fn test_fixed_runs() {
        // header, 6 x uint16, trailer
        let mut buf = FixedBuffer::<22>::new();
        buf.put_array_header::<0, 6>();
        let next = buf.put_many::<u16, 1, 6>(&[1, 2, 3, 100, 200, 300]);
        assert_eq!(next, 19);
        buf.seal();

        assert_eq!(buf[0], 0x96);
        assert_eq!(&buf[1..4], hex!("CD 00 01"));
        assert_eq!(buf.get_many::<u16, 1, 6>().unwrap(), [1, 2, 3, 100, 200, 300]);
        assert!(buf.verify());

        let mut corrupted = buf;
        corrupted.bytes[4] = 0xCE;
        assert!(corrupted.get_many::<u16, 1, 6>().is_err());
        assert!(!corrupted.verify());
    }

    #[test]
    fn test_fixed_writer_and_reader() {
        let mut buf = FixedBuffer::<6>::new();
        {
            let mut writer = buf.writer();
            writer.put_array_header(ArrayLength::new(2).unwrap()).unwrap();
            writer.put(true).unwrap();
            writer.put(9u8).unwrap();
            assert!(writer.put(1u16).is_err());
        }
        assert_eq!(buf.as_bytes(), &hex!("92 C3 CC 09 00 00"));

        let mut reader = buf.reader();
        assert_eq!(reader.take_array_header().unwrap().get(), 2);
        assert!(reader.take::<bool>().unwrap());
        assert_eq!(reader.take::<u8>().unwrap(), 9);
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn test_from_slice_length_rules() {
        assert!(FixedBuffer::<13>::from_slice(&SCENARIO_A).unwrap().verify());
        assert!(matches!(
            FixedBuffer::<13>::from_slice(&SCENARIO_A[..12]),
            Err(CodecError::Truncated { need: 13, available: 12, .. })
        ));
        assert!(matches!(
            FixedBuffer::<12>::from_slice(&SCENARIO_A),
            Err(CodecError::TrailingBytes { consumed: 12, total: 13 })
        ));
    }

    #[test]
    fn test_debug_is_hex() {
        let buf = FixedBuffer::from_bytes([0x91, 0xC3]);
        assert_eq!(format!("{buf:?}"), "FixedBuffer<2>(91c3)");

        let mut grown = GrowableBuffer::with_capacity(4);
        grown.put(false).unwrap();
        assert_eq!(format!("{grown:?}"), "GrowableBuffer(c2)");
        grown.clear();
        assert!(grown.is_empty());
    }
}
