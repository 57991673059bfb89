//! # Endian Canonicalizer
//!
//! Converts fixed-width values to and from canonical wire order (most
//! significant byte first). Values are decomposed arithmetically with shifts
//! and masks, so the result never depends on host byte order and no typed
//! value is ever viewed through a byte-array alias.
//!
//! Floats go through their IEEE-754 bit pattern; every bit, NaN payloads
//! included, is preserved.

/// Fixed-width value with a canonical big-endian byte form
pub trait Canonical: Copy {
    /// Number of payload bytes on the wire
    const WIDTH: usize;

    /// Write `WIDTH` canonical bytes to the front of `out`
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `WIDTH`.
    fn write_canonical(self, out: &mut [u8]);

    /// Rebuild a value from the first `WIDTH` bytes of `bytes`
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than `WIDTH`.
    fn read_canonical(bytes: &[u8]) -> Self;
}

macro_rules! impl_canonical_uint {
    ($($native:ty => $width:expr),* $(,)?) => {
        $(
            impl Canonical for $native {
                const WIDTH: usize = $width;

                #[inline]
                fn write_canonical(self, out: &mut [u8]) {
                    let value = u64::from(self);
                    for (i, byte) in out[..$width].iter_mut().enumerate() {
                        let shift = 8 * ($width - 1 - i);
                        *byte = ((value >> shift) & 0xFF) as u8;
                    }
                }

                #[inline]
                fn read_canonical(bytes: &[u8]) -> Self {
                    let value = bytes[..$width]
                        .iter()
                        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));
                    // at most $width significant bytes were folded in
                    value as $native
                }
            }
        )*
    };
}

impl_canonical_uint! {
    u8 => 1,
    u16 => 2,
    u32 => 4,
    u64 => 8,
}

impl Canonical for f32 {
    const WIDTH: usize = 4;

    #[inline]
    fn write_canonical(self, out: &mut [u8]) {
        self.to_bits().write_canonical(out);
    }

    #[inline]
    fn read_canonical(bytes: &[u8]) -> Self {
        f32::from_bits(u32::read_canonical(bytes))
    }
}

impl Canonical for f64 {
    const WIDTH: usize = 8;

    #[inline]
    fn write_canonical(self, out: &mut [u8]) {
        self.to_bits().write_canonical(out);
    }

    #[inline]
    fn read_canonical(bytes: &[u8]) -> Self {
        f64::from_bits(u64::read_canonical(bytes))
    }
}
