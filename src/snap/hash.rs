//! # SNAP Hash Kernels
//!
//! Pure functions computing the integrity values a frame can carry, each
//! widened to `u32` so the caller handles every mode uniformly:
//!
//! | EDM | Kernel | Width | Parameters |
//! |-----|--------|-------|------------|
//! | 2 | [`checksum8`] | 1 | byte sum mod 256 |
//! | 3 | [`crc8`] | 1 | CRC-8/MAXIM: poly 0x31 reflected, init 0x00 |
//! | 4 | [`crc16`] | 2 | CRC-16/XMODEM: poly 0x1021, init 0x0000 |
//! | 5 | [`crc32`] | 4 | CRC-32/ISO-HDLC: poly 0x04C11DB7 reflected, init/xorout 0xFFFFFFFF |
//! | 7 | [`UserHash`] | 0..4 | caller-installed, default [`crc24_openpgp`] |
//!
//! The 8- and 16-bit CRCs are bitwise MSB-first; the 32-bit CRC runs off a
//! lazily built 256-entry table.

use crate::constants::{SNAP_EDM_CHECKSUM8, SNAP_EDM_CRC16, SNAP_EDM_CRC32, SNAP_EDM_CRC8};
use once_cell::sync::Lazy;

/// CRC-8/MAXIM polynomial, reflected form
const CRC8_POLY_REFLECTED: u8 = 0x8C;

/// CRC-16/XMODEM polynomial
const CRC16_POLY: u16 = 0x1021;

/// CRC-32/ISO-HDLC polynomial, reflected form
const CRC32_POLY_REFLECTED: u32 = 0xEDB8_8320;

/// CRC-24/OPENPGP polynomial
const CRC24_POLY: u32 = 0x0086_4CFB;

/// CRC-24/OPENPGP initial value
const CRC24_INIT: u32 = 0x00B7_04CE;

static CRC32_TABLE: Lazy<[u32; 256]> = Lazy::new(|| {
    let mut table = [0u32; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        let mut crc = i as u32;
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ CRC32_POLY_REFLECTED
            } else {
                crc >> 1
            };
        }
        *entry = crc;
    }
    table
});

/// Calculates the 8-bit arithmetic checksum (byte sum mod 256).
pub fn checksum8(data: &[u8]) -> u32 {
    u32::from(data.iter().fold(0u8, |sum, &byte| sum.wrapping_add(byte)))
}

/// Calculates CRC-8/MAXIM (the Dallas/Maxim 1-Wire CRC).
pub fn crc8(data: &[u8]) -> u32 {
    let mut crc = 0u8;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ CRC8_POLY_REFLECTED
            } else {
                crc >> 1
            };
        }
    }
    u32::from(crc)
}

/// Calculates CRC-16/XMODEM.
pub fn crc16(data: &[u8]) -> u32 {
    let mut crc = 0u16;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ CRC16_POLY
            } else {
                crc << 1
            };
        }
    }
    u32::from(crc)
}

/// Calculates CRC-32/ISO-HDLC (the zlib/Ethernet CRC).
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        let index = usize::from((crc as u8) ^ byte);
        crc = (crc >> 8) ^ CRC32_TABLE[index];
    }
    crc ^ 0xFFFF_FFFF
}

/// Calculates CRC-24/OPENPGP, the default user hash kernel.
pub fn crc24_openpgp(data: &[u8]) -> u32 {
    let mut crc = CRC24_INIT;
    for &byte in data {
        crc ^= u32::from(byte) << 16;
        for _ in 0..8 {
            crc = if crc & 0x0080_0000 != 0 {
                (crc << 1) ^ CRC24_POLY
            } else {
                crc << 1
            };
            crc &= 0x00FF_FFFF;
        }
    }
    crc
}

/// Signature of a user hash kernel: a pure function over the covered bytes.
pub type UserHashFn = fn(&[u8]) -> u32;

/// The user-defined error detection mode (EDM 7).
///
/// The kernel is a plain value injected when the frame handle is built, so
/// two handles can run different kernels in one process. There is no global
/// dispatch to override.
#[derive(Debug, Clone, Copy)]
pub struct UserHash {
    size: u8,
    func: UserHashFn,
}

impl UserHash {
    /// Creates a user hash of the given width in bytes.
    ///
    /// Widths above 4 cannot widen into the `u32` field accessors and are
    /// clamped, mirroring the silent capacity clamp at frame init.
    pub fn new(size: u8, func: UserHashFn) -> Self {
        UserHash {
            size: size.min(4),
            func,
        }
    }

    /// Width of the hash field this kernel produces, in bytes.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Runs the kernel over `data`.
    pub fn compute(&self, data: &[u8]) -> u32 {
        (self.func)(data)
    }
}

impl Default for UserHash {
    /// The 3-byte CRC-24/OPENPGP kernel.
    fn default() -> Self {
        UserHash {
            size: 3,
            func: crc24_openpgp,
        }
    }
}

/// Runs the kernel selected by an EDM value over `data`.
///
/// Modes without hash bytes (0, 1, 6) return 0; callers gate on the hash
/// width before interpreting the value.
pub(crate) fn compute_by_edm(edm: u8, user_hash: &UserHash, data: &[u8]) -> u32 {
    match edm {
        SNAP_EDM_CHECKSUM8 => checksum8(data),
        SNAP_EDM_CRC8 => crc8(data),
        SNAP_EDM_CRC16 => crc16(data),
        SNAP_EDM_CRC32 => crc32(data),
        crate::constants::SNAP_EDM_USER => user_hash.compute(data),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERN: [u8; 16] = [
        0xF0, 0xE1, 0xD2, 0xC3, 0xB4, 0xA5, 0x96, 0x87, 0x78, 0x69, 0x5A, 0x4B, 0x3C, 0x2D, 0x1E,
        0x0F,
    ];

    #[test]
    fn test_checksum8_vectors() {
        assert_eq!(checksum8(b"snap"), 0xB2);
        assert_eq!(checksum8(b"SNAP"), 0x32);
        assert_eq!(checksum8(&PATTERN), 0xF8);
    }

    #[test]
    fn test_crc8_vectors() {
        assert_eq!(crc8(b"snap"), 0x17);
        assert_eq!(crc8(b"SNAP"), 0x11);
        assert_eq!(crc8(&PATTERN), 0xD8);
    }

    #[test]
    fn test_crc16_vectors() {
        assert_eq!(crc16(b"snap"), 0x1F4F);
        assert_eq!(crc16(b"SNAP"), 0x8C43);
        assert_eq!(crc16(&PATTERN), 0xD214);
    }

    #[test]
    fn test_crc32_vectors() {
        assert_eq!(crc32(b"snap"), 0x36641D9E);
        assert_eq!(crc32(b"SNAP"), 0x00F1F02A);
        assert_eq!(crc32(&PATTERN), 0x2B21D32F);
    }

    #[test]
    fn test_crc24_vectors() {
        assert_eq!(crc24_openpgp(b"snap"), 0xDD91A8);
        assert_eq!(crc24_openpgp(b"SNAP"), 0x4EA35C);
        assert_eq!(crc24_openpgp(&PATTERN), 0x42A8A4);
    }

    #[test]
    fn test_user_hash_width_clamp() {
        let user = UserHash::new(9, crc24_openpgp);
        assert_eq!(user.size(), 4);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(checksum8(&[]), 0);
        assert_eq!(crc8(&[]), 0);
        assert_eq!(crc16(&[]), 0);
        assert_eq!(crc32(&[]), 0);
        assert_eq!(crc24_openpgp(&[]), CRC24_INIT);
    }
}
