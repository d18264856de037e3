//! # Utility Modules
//!
//! Common helpers used throughout the snap-rs crate, currently hex
//! encoding/decoding for log output and test fixtures.

pub mod hex;

// Re-export commonly used functions
pub use hex::{decode_hex, encode_hex, format_hex_compact, hex_to_bytes};
