//! # SNAP Streaming Decoder
//!
//! Byte-at-a-time frame reception. The decoder is a state machine driven by
//! the handle's current status and size:
//!
//! - `Idle`: every byte other than the sync byte is preamble noise and
//!   silently discarded. The sync byte is stored and opens a frame.
//! - `Incomplete`: each byte is appended. Once the two header bytes are in,
//!   the total frame length is locked; a length beyond the buffer capacity
//!   fails fast with `ErrorOverflow`. When the last byte arrives the embedded
//!   hash (if the header declares one) is verified.
//! - `Valid` / `ErrorHash` / `ErrorOverflow`: terminal. All further input is
//!   postamble noise and ignored until [`SnapFrame::reset`].
//!
//! Bytes consumed while `Idle` are never stored, so a frame always starts at
//! offset 0 of the buffer regardless of how much noise preceded it.

use crate::constants::{SNAP_HDB1_OFFSET, SNAP_HDB2_OFFSET, SNAP_MIN_FRAME, SNAP_SYNC};
use crate::snap::frame::{SnapFrame, SnapStatus};
use crate::snap::hash::compute_by_edm;
use crate::snap::header::{FrameLayout, SnapHeader};
use crate::snap::read_be;
use crate::util::hex::format_hex_compact;
use log::{debug, trace, warn};

impl SnapFrame<'_> {
    /// Consumes one byte from the transport and returns the new status.
    pub fn decode(&mut self, byte: u8) -> SnapStatus {
        match self.status {
            SnapStatus::Valid | SnapStatus::ErrorHash | SnapStatus::ErrorOverflow => {
                return self.status;
            }
            SnapStatus::Idle => {
                if byte != SNAP_SYNC {
                    return self.status;
                }
                trace!("sync byte received, frame opened");
                self.buffer[0] = byte;
                self.size = 1;
                self.status = SnapStatus::Incomplete;
            }
            SnapStatus::Incomplete => {
                self.buffer[usize::from(self.size)] = byte;
                self.size += 1;

                if self.size == SNAP_MIN_FRAME {
                    self.lock_layout();
                } else if self.size > SNAP_MIN_FRAME {
                    // Layout is known; check whether this byte completed the frame.
                    let (header, layout) = self.declared_layout();
                    if usize::from(self.size) == layout.total {
                        self.verify(&header, &layout);
                    }
                }
            }
        }
        self.status
    }

    /// The header and layout declared by the stored header bytes.
    ///
    /// Only meaningful once `size >= SNAP_MIN_FRAME`.
    fn declared_layout(&self) -> (SnapHeader, FrameLayout) {
        let header = SnapHeader::from_bytes(
            self.buffer[SNAP_HDB2_OFFSET],
            self.buffer[SNAP_HDB1_OFFSET],
        );
        let layout = FrameLayout::from_header(&header, self.user_hash.size());
        (header, layout)
    }

    /// Handles the moment the header completes: commits to the declared
    /// layout or rejects it against the buffer capacity.
    fn lock_layout(&mut self) {
        let (header, layout) = self.declared_layout();
        if layout.total > usize::from(self.max_size) {
            warn!(
                "frame of {} bytes exceeds buffer capacity {}",
                layout.total, self.max_size
            );
            self.status = SnapStatus::ErrorOverflow;
        } else if layout.total == usize::from(SNAP_MIN_FRAME) {
            // Header-only frame: nothing follows, not even a hash.
            self.verify(&header, &layout);
        }
    }

    /// Handles the moment the frame completes: checks the embedded hash
    /// against the computed one and settles the terminal status.
    fn verify(&mut self, header: &SnapHeader, layout: &FrameLayout) {
        if layout.hash_size == 0 {
            debug!("frame complete, {} bytes, no error detection", layout.total);
            self.status = SnapStatus::Valid;
            return;
        }

        let computed = compute_by_edm(
            header.edm,
            &self.user_hash,
            &self.buffer[1..layout.hash_offset],
        );
        let embedded = read_be(&self.buffer[layout.hash_offset..layout.total]);

        if computed == embedded {
            debug!(
                "frame complete, {} bytes, hash {:#X} verified",
                layout.total, embedded
            );
            self.status = SnapStatus::Valid;
        } else {
            warn!(
                "hash mismatch: embedded {:#X}, computed {:#X}, frame = {}",
                embedded,
                computed,
                format_hex_compact(&self.buffer[..layout.total])
            );
            self.status = SnapStatus::ErrorHash;
        }
    }
}
