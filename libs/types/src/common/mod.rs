//! Common types shared across the schema and value modules

pub mod errors;
