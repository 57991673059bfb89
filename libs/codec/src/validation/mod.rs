//! # Message Validation
//!
//! Bounds checks, the CRC-16 integrity trailer and decode policy.
//!
//! ```text
//! raw bytes → size limit → trailer check → header / field decode
//!              (config)     (checksum)       (bounds)
//! ```

pub mod bounds;
pub mod checksum;
pub mod config;
pub mod trailer;

pub use bounds::{check_buffer_bounds, safe_slice, safe_slice_mut};
pub use checksum::{crc16_aug_ccitt, Crc16, CRC16_EMPTY, CRC16_POLY};
pub use config::{CodecConfig, DecodePolicy};
pub use trailer::{append_trailer, check_trailer, push_trailer, verify_trailer};
