//! # snap-rs - A Rust Crate for S.N.A.P. (Scalable Node Address Protocol) Framing
//!
//! The snap-rs crate implements the SNAP link-layer framing protocol: a
//! byte-oriented frame format whose two-byte header selects, per frame, the
//! widths of the destination address, source address, protocol flags, payload
//! and integrity field.
//!
//! ## Features
//!
//! - Encapsulate structured fields into the exact on-wire byte sequence of a
//!   frame, in a caller-provided buffer (no allocation)
//! - Decode a byte stream one byte at a time, discarding preamble and
//!   postamble noise around the frame
//! - Verify frame integrity with the protocol's error detection modes:
//!   8-bit checksum, CRC-8/MAXIM, CRC-16/XMODEM, CRC-32/ISO-HDLC, or a
//!   user-installed kernel
//! - Retrieve individual fields (header, addresses, flags, payload, hash)
//!   from a frame buffer
//! - Strip the zero padding the nonlinear payload-width codes introduce
//!
//! Byte transport (serial, TCP) is out of scope: the caller moves bytes, the
//! library moves frames.
//!
//! ## Usage
//!
//! ```rust
//! use snap_rs::{SnapFields, SnapFrame, SnapHeader, SnapStatus};
//!
//! let mut buffer = [0u8; 64];
//! let mut frame = SnapFrame::new(&mut buffer).unwrap();
//!
//! let fields = SnapFields {
//!     header: SnapHeader { dab: 1, sab: 0, pfb: 0, ack: 0, cmd: 0, edm: 4, ndb: 0 },
//!     dest_address: 0xA0,
//!     source_address: 0,
//!     protocol_flags: 0,
//!     data: b"hello",
//!     padding_after: true,
//! };
//! assert_eq!(frame.encapsulate(&fields), SnapStatus::Valid);
//!
//! // The frame bytes are now in `frame.frame_bytes()`, ready for transport.
//! let wire: Vec<u8> = frame.frame_bytes().to_vec();
//!
//! // On the receiving side, feed bytes back through the streaming decoder.
//! let mut rx_buffer = [0u8; 64];
//! let mut rx = SnapFrame::new(&mut rx_buffer).unwrap();
//! for byte in wire {
//!     rx.decode(byte);
//! }
//! assert_eq!(rx.status(), SnapStatus::Valid);
//! assert_eq!(rx.get_dest_address().unwrap().value, 0xA0);
//! ```

pub mod constants;
pub mod error;
pub mod logging;
pub mod snap;
pub mod util;

pub use crate::error::SnapError;
pub use crate::logging::{init_logger, log_info};

// Core SNAP types
pub use snap::{InPlaceFields, SnapField, SnapFields, SnapFrame, SnapHeader, SnapStatus};

// Frame layout introspection
pub use snap::FrameLayout;

// Pluggable user error detection (EDM 7)
pub use snap::{UserHash, UserHashFn};

// Pure protocol helpers
pub use snap::{
    checksum8, crc16, crc24_openpgp, crc32, crc8, data_size_from_ndb, hash_size_from_edm,
    ndb_from_data_size, remove_padding,
};

// Wire-level constants
pub use constants::{SNAP_MAX_DATA, SNAP_MAX_FRAME, SNAP_MIN_FRAME, SNAP_SYNC};
