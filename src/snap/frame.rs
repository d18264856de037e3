//! # SNAP Frame Handle
//!
//! This module provides [`SnapFrame`], the single stateful object of the
//! library. A handle borrows a caller-supplied byte buffer and tracks how much
//! of it currently holds frame bytes and what state those bytes are in. The
//! same handle serves both directions: [`decode`](SnapFrame::decode) fills the
//! buffer from a byte stream, [`encapsulate`](SnapFrame::encapsulate) fills it
//! from structured fields. The library never allocates; the buffer is the only
//! storage a frame ever uses.
//!
//! ## Usage
//!
//! ```rust
//! use snap_rs::{SnapFrame, SnapStatus};
//!
//! let mut buffer = [0u8; 64];
//! let mut frame = SnapFrame::new(&mut buffer).unwrap();
//!
//! // Feed bytes from the transport until a frame completes.
//! for byte in [0x54, 0x01, 0x00] {
//!     frame.decode(byte);
//! }
//! assert_eq!(frame.status(), SnapStatus::Valid);
//! ```

use crate::constants::{SNAP_HDB1_OFFSET, SNAP_HDB2_OFFSET, SNAP_MAX_FRAME, SNAP_MIN_FRAME};
use crate::error::SnapError;
use crate::snap::hash::UserHash;
use crate::snap::header::{FrameLayout, SnapHeader};
use std::fmt;

/// State of the bytes a frame handle currently holds.
///
/// The two error states and `Valid` are terminal: once reached, further
/// decode input is ignored until the handle is [`reset`](SnapFrame::reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapStatus {
    /// No frame bytes stored; waiting for a sync byte
    Idle,
    /// Sync byte seen; the frame is still accumulating
    Incomplete,
    /// A complete frame whose integrity check passed (or that carries none)
    Valid,
    /// A complete frame whose embedded hash disagrees with the computed one
    ErrorHash,
    /// The header declared a frame longer than the buffer capacity
    ErrorOverflow,
}

impl SnapStatus {
    /// Returns true for the sticky end states (`Valid` and both errors).
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SnapStatus::Valid | SnapStatus::ErrorHash | SnapStatus::ErrorOverflow
        )
    }
}

impl fmt::Display for SnapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SnapStatus::Idle => "IDLE",
            SnapStatus::Incomplete => "INCOMPLETE",
            SnapStatus::Valid => "VALID",
            SnapStatus::ErrorHash => "ERROR_HASH",
            SnapStatus::ErrorOverflow => "ERROR_OVERFLOW",
        };
        f.write_str(name)
    }
}

/// A SNAP frame bound to a caller-supplied buffer.
///
/// The handle is exclusively owned by one thread at a time; operations are
/// synchronous, non-blocking and perform at most O(frame length) work.
#[derive(Debug)]
pub struct SnapFrame<'a> {
    pub(crate) buffer: &'a mut [u8],
    pub(crate) max_size: u16,
    pub(crate) size: u16,
    pub(crate) status: SnapStatus,
    pub(crate) user_hash: UserHash,
}

impl<'a> SnapFrame<'a> {
    /// Binds a frame handle to `buffer` with the default user hash
    /// (3-byte CRC-24/OPENPGP).
    ///
    /// Buffers longer than [`SNAP_MAX_FRAME`] are accepted and the usable
    /// capacity silently clamped; buffers shorter than [`SNAP_MIN_FRAME`]
    /// are rejected.
    pub fn new(buffer: &'a mut [u8]) -> Result<Self, SnapError> {
        Self::with_user_hash(buffer, UserHash::default())
    }

    /// Binds a frame handle to `buffer` with a caller-supplied user hash
    /// kernel for EDM 7.
    pub fn with_user_hash(buffer: &'a mut [u8], user_hash: UserHash) -> Result<Self, SnapError> {
        if buffer.len() < usize::from(SNAP_MIN_FRAME) {
            return Err(SnapError::ShortBuffer {
                size: buffer.len(),
                minimum: usize::from(SNAP_MIN_FRAME),
            });
        }
        let max_size = buffer.len().min(usize::from(SNAP_MAX_FRAME)) as u16;
        Ok(SnapFrame {
            buffer,
            max_size,
            size: 0,
            status: SnapStatus::Idle,
            user_hash,
        })
    }

    /// Discards any stored bytes and returns the handle to `Idle`.
    ///
    /// The buffer binding and capacity are kept, so one buffer can carry many
    /// frames in sequence.
    pub fn reset(&mut self) {
        self.size = 0;
        self.status = SnapStatus::Idle;
    }

    /// Usable capacity in bytes, after clamping to [`SNAP_MAX_FRAME`].
    pub fn capacity(&self) -> u16 {
        self.max_size
    }

    /// Number of frame bytes currently stored.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Current frame status.
    pub fn status(&self) -> SnapStatus {
        self.status
    }

    /// The stored frame bytes, sync byte first.
    pub fn frame_bytes(&self) -> &[u8] {
        &self.buffer[..usize::from(self.size)]
    }

    /// The high header byte (HDB2).
    ///
    /// Fails with [`SnapError::UnknownFormat`] until the header is complete.
    pub fn hdb2(&self) -> Result<u8, SnapError> {
        self.require_header()?;
        Ok(self.buffer[SNAP_HDB2_OFFSET])
    }

    /// The low header byte (HDB1).
    ///
    /// Fails with [`SnapError::UnknownFormat`] until the header is complete.
    pub fn hdb1(&self) -> Result<u8, SnapError> {
        self.require_header()?;
        Ok(self.buffer[SNAP_HDB1_OFFSET])
    }

    /// Field offsets and widths declared by the stored header.
    ///
    /// Fails with [`SnapError::UnknownFormat`] until the header is complete.
    pub fn layout(&self) -> Result<FrameLayout, SnapError> {
        let header = self.parsed_header()?;
        Ok(FrameLayout::from_header(&header, self.user_hash.size()))
    }

    pub(crate) fn require_header(&self) -> Result<(), SnapError> {
        if self.size < SNAP_MIN_FRAME {
            return Err(SnapError::UnknownFormat);
        }
        Ok(())
    }

    pub(crate) fn parsed_header(&self) -> Result<SnapHeader, SnapError> {
        self.require_header()?;
        Ok(SnapHeader::from_bytes(
            self.buffer[SNAP_HDB2_OFFSET],
            self.buffer[SNAP_HDB1_OFFSET],
        ))
    }
}
