//! CRC-16 Checksum
//!
//! 16-bit CRC with polynomial 0x1021 in augmented form: the register starts
//! at 0xFFFF, message bits are shifted in most significant bit first, and
//! sixteen zero bits are shifted in at the end to flush the register.
//!
//! The result equals the direct (non-augmented) CRC-16 with polynomial
//! 0x1021 and initial value 0x1D0F, known as CRC-16/AUG-CCITT or
//! CRC-16/SPI-FUJITSU. The empty message therefore checksums to 0x1D0F.
//! The calculator runs the direct form a byte at a time through a table
//! built at compile time, so no flush step is needed.

/// Generator polynomial (x^16 + x^12 + x^5 + 1)
pub const CRC16_POLY: u16 = 0x1021;

/// Checksum of the empty message, and the equivalent direct-form initial value
pub const CRC16_EMPTY: u16 = 0x1D0F;

const CRC16_TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut index = 0;
    while index < 256 {
        let mut crc = (index as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ CRC16_POLY
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[index] = crc;
        index += 1;
    }
    table
}

/// Checksum of `data` in one call
pub fn crc16_aug_ccitt(data: &[u8]) -> u16 {
    let mut crc = Crc16::new();
    crc.update(data);
    crc.finalize()
}

/// Streaming checksum calculator
///
/// Feeding the message in pieces gives the same result as one
/// [`crc16_aug_ccitt`] call over the concatenation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc16 {
    register: u16,
}

impl Crc16 {
    pub const fn new() -> Self {
        Self {
            register: CRC16_EMPTY,
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            let index = usize::from((self.register >> 8) as u8 ^ byte);
            self.register = (self.register << 8) ^ CRC16_TABLE[index];
        }
    }

    /// Checksum of everything fed so far
    pub fn finalize(self) -> u16 {
        self.register
    }

    pub fn reset(&mut self) {
        self.register = CRC16_EMPTY;
    }
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::new()
    }
}
