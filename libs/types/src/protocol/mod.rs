//! Wire-level protocol definitions
//!
//! The tag table and the widths derived from it. Encoding rules that act on
//! these values live in the codec crate.

pub mod constants;
pub mod tag;

pub use constants::{array_header_len, is_fixarray};
pub use tag::WireTag;
