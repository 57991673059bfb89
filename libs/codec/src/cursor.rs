//! # Sequential Writers and Readers
//!
//! [`WireWriter`] abstracts over where encoded bytes go, so one encoder
//! drives a growable buffer or a caller-provided slice alike. [`WireReader`]
//! walks a message front to back, tracking the offset so every error says
//! where decoding stopped.

use microbuf_types::{PrimitiveKind, PrimitiveValue};

use crate::array::{decode_array_header, encode_array_header, expect_array_header, ArrayLength};
use crate::error::{CodecError, CodecResult};
use crate::primitive::{self, Primitive};
use crate::repeat::decode_many_into;
use crate::validation::checksum::crc16_aug_ccitt;

/// Append-only byte sink for encoded values
///
/// Implementors provide raw byte writes; the typed operations are built on
/// top. A failed write leaves the sink unchanged.
pub trait WireWriter {
    /// Append `bytes`, or fail without writing any of them
    fn write_bytes(&mut self, bytes: &[u8]) -> CodecResult<()>;

    /// Bytes written so far
    fn written(&self) -> &[u8];

    /// Fail unless `len` more bytes fit
    fn ensure_capacity(&mut self, len: usize) -> CodecResult<()>;

    fn position(&self) -> usize {
        self.written().len()
    }

    fn put<T: Primitive>(&mut self, value: T) -> CodecResult<usize>
    where
        Self: Sized,
    {
        self.write_bytes(&primitive::encode(value))?;
        Ok(T::ENCODED_LEN)
    }

    fn put_value(&mut self, value: PrimitiveValue) -> CodecResult<usize>
    where
        Self: Sized,
    {
        let encoded = primitive::encode_value(value);
        self.write_bytes(&encoded)?;
        Ok(encoded.len())
    }

    fn put_array_header(&mut self, length: ArrayLength) -> CodecResult<usize>
    where
        Self: Sized,
    {
        let header = encode_array_header(length);
        self.write_bytes(&header)?;
        Ok(header.len())
    }

    /// Write a repeated run; the whole run fits or nothing is written
    fn put_many<T: Primitive>(&mut self, values: &[T]) -> CodecResult<usize>
    where
        Self: Sized,
    {
        if values.is_empty() {
            return Err(CodecError::ZeroLength {
                context: "repeated run",
            });
        }
        let run_len = values.len() * T::ENCODED_LEN;
        self.ensure_capacity(run_len)?;
        for &value in values {
            self.put(value)?;
        }
        Ok(run_len)
    }

    /// Seal the message that started at `message_start` with a trailer
    fn put_trailer(&mut self, message_start: usize) -> CodecResult<u16>
    where
        Self: Sized,
    {
        let crc = {
            let written = self.written();
            let covered = written.get(message_start..).ok_or(CodecError::Truncated {
                offset: message_start,
                need: 0,
                available: 0,
                context: "trailer start beyond written bytes",
            })?;
            crc16_aug_ccitt(covered)
        };
        self.put(crc)?;
        Ok(crc)
    }
}

impl WireWriter for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn written(&self) -> &[u8] {
        self
    }

    fn ensure_capacity(&mut self, len: usize) -> CodecResult<()> {
        self.reserve(len);
        Ok(())
    }
}

/// Bounded writer over a caller-provided slice
#[derive(Debug)]
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Number of bytes written, consuming the writer
    pub fn finish(self) -> usize {
        self.pos
    }
}

impl WireWriter for SliceWriter<'_> {
    fn write_bytes(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.ensure_capacity(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    fn ensure_capacity(&mut self, len: usize) -> CodecResult<()> {
        if len > self.remaining() {
            return Err(CodecError::BufferTooSmall {
                need: self.pos.saturating_add(len),
                got: self.buf.len(),
                context: "slice writer",
            });
        }
        Ok(())
    }
}

/// Sequential decoder over one message
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Start reading at `offset` instead of the beginning
    pub fn at(buf: &'a [u8], offset: usize) -> Self {
        Self { buf, pos: offset }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Bytes not yet consumed
    pub fn rest(&self) -> &'a [u8] {
        self.buf.get(self.pos..).unwrap_or(&[])
    }

    pub fn take<T: Primitive>(&mut self) -> CodecResult<T> {
        let value = primitive::decode_at(self.buf, self.pos)?;
        self.pos += T::ENCODED_LEN;
        Ok(value)
    }

    pub fn take_value(&mut self, kind: PrimitiveKind) -> CodecResult<PrimitiveValue> {
        let value = primitive::decode_value_at(kind, self.buf, self.pos)?;
        self.pos += kind.encoded_len();
        Ok(value)
    }

    pub fn take_array_header(&mut self) -> CodecResult<ArrayLength> {
        let (length, next) = decode_array_header(self.buf, self.pos)?;
        self.pos = next;
        Ok(length)
    }

    pub fn expect_array_header(&mut self, expected: ArrayLength) -> CodecResult<()> {
        self.pos = expect_array_header(self.buf, self.pos, expected)?;
        Ok(())
    }

    pub fn take_many<T: Primitive, const N: usize>(&mut self) -> CodecResult<[T; N]> {
        let mut values = [T::default(); N];
        self.take_many_into(&mut values)?;
        Ok(values)
    }

    pub fn take_many_into<T: Primitive>(&mut self, out: &mut [T]) -> CodecResult<()> {
        self.pos = decode_many_into(self.buf, self.pos, out)?;
        Ok(())
    }

    /// Require that every byte was consumed, returning the message length
    pub fn finish(self) -> CodecResult<usize> {
        if self.pos != self.buf.len() {
            return Err(CodecError::TrailingBytes {
                consumed: self.pos,
                total: self.buf.len(),
            });
        }
        Ok(self.pos)
    }
}
