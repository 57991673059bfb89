//! Integrity trailer
//!
//! The last three bytes of a sealed message are a uint16 primitive holding
//! the CRC-16 of every byte before them, array header included.
//!
//! ```text
//! [covered bytes ..........] [CD] [crc hi] [crc lo]
//! ```

use microbuf_types::TRAILER_LEN;
use tracing::debug;

use crate::error::{CodecError, CodecResult};
use crate::primitive::{self, encode};
use crate::validation::checksum::crc16_aug_ccitt;

/// Write the trailer into the last three bytes of `buffer`
///
/// Everything before them is covered; the returned value is the checksum
/// that was written.
pub fn append_trailer(buffer: &mut [u8]) -> CodecResult<u16> {
    if buffer.len() < TRAILER_LEN {
        return Err(CodecError::BufferTooSmall {
            need: TRAILER_LEN,
            got: buffer.len(),
            context: "integrity trailer",
        });
    }
    let covered = buffer.len() - TRAILER_LEN;
    let crc = crc16_aug_ccitt(&buffer[..covered]);
    buffer[covered..].copy_from_slice(&encode(crc));
    Ok(crc)
}

/// Checksum the current contents and append the trailer after them
pub fn push_trailer(buffer: &mut Vec<u8>) -> u16 {
    let crc = crc16_aug_ccitt(buffer);
    primitive::append(buffer, crc);
    crc
}

/// Verify the trailer, returning the checksum or a detailed mismatch
pub fn check_trailer(buffer: &[u8]) -> CodecResult<u16> {
    if buffer.len() < TRAILER_LEN {
        return Err(CodecError::truncated(buffer.len(), 0, TRAILER_LEN, "integrity trailer"));
    }
    let covered = buffer.len() - TRAILER_LEN;
    let stored: u16 = primitive::decode_at(buffer, covered)?;
    let calculated = crc16_aug_ccitt(&buffer[..covered]);

    if stored != calculated {
        return Err(CodecError::checksum_mismatch(stored, calculated, buffer.len()));
    }
    Ok(calculated)
}

/// Boolean form of [`check_trailer`]
pub fn verify_trailer(buffer: &[u8]) -> bool {
    match check_trailer(buffer) {
        Ok(_) => true,
        Err(err) => {
            debug!(error = %err, len = buffer.len(), "Trailer verification failed");
            false
        }
    }
}
