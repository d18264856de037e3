//! # SNAP Framing Module
//!
//! This module provides the complete SNAP framing layer: the frame handle,
//! the byte-at-a-time streaming decoder, the encapsulator, the field
//! accessors, and the pure helpers they are built on (header codec, hash
//! kernels, padding removal).

pub mod decode;
pub mod encode;
pub mod field;
pub mod frame;
pub mod hash;
pub mod header;
pub mod padding;

// Re-export the necessary types and functions from the submodules
pub use encode::{InPlaceFields, SnapFields};
pub use field::SnapField;
pub use frame::{SnapFrame, SnapStatus};
pub use hash::{checksum8, crc16, crc24_openpgp, crc32, crc8, UserHash, UserHashFn};
pub use header::{
    data_size_from_ndb, hash_size_from_edm, ndb_from_data_size, FrameLayout, SnapHeader,
};
pub use padding::remove_padding;

/// Reads a big-endian integer of up to 4 bytes.
pub(crate) fn read_be(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |value, &byte| (value << 8) | u32::from(byte))
}

/// Writes the low `dst.len()` bytes of `value` big-endian into `dst`.
pub(crate) fn write_be(dst: &mut [u8], value: u32) {
    let width = dst.len();
    for (i, byte) in dst.iter_mut().enumerate() {
        *byte = (value >> (8 * (width - 1 - i))) as u8;
    }
}
