//! # SNAP Frame Encapsulation
//!
//! Serializes structured fields into the exact on-wire byte sequence of a
//! frame, directly in the handle's buffer. Two entry points cover the two
//! memory arrangements:
//!
//! - [`SnapFrame::encapsulate`] takes the payload as a slice disjoint from
//!   the frame buffer.
//! - [`SnapFrame::encapsulate_in_place`] takes the payload already staged at
//!   the front of the frame buffer itself and moves it to its final offset
//!   before any header byte is written. This lets one array serve as both
//!   payload source and frame storage, without aliased borrows.
//!
//! The NDB code is always derived from the payload length, and payloads
//! shorter than the selected width are zero-padded on the side chosen by
//! `padding_after`.

use crate::constants::{SNAP_HDB1_OFFSET, SNAP_HDB2_OFFSET, SNAP_MAX_DATA, SNAP_SYNC,
    SNAP_SYNC_OFFSET};
use crate::snap::frame::{SnapFrame, SnapStatus};
use crate::snap::hash::compute_by_edm;
use crate::snap::header::{ndb_from_data_size, FrameLayout, SnapHeader};
use crate::snap::write_be;
use log::{trace, warn};

/// Input fields for [`SnapFrame::encapsulate`].
///
/// `header.ndb` is ignored; the encoder derives it from `data.len()`.
/// Addresses and flags are taken from the low bytes of their `u32`, written
/// big-endian at the width the header declares.
#[derive(Debug, Clone, Copy)]
pub struct SnapFields<'d> {
    /// Header bit-fields (`ndb` derived, not read)
    pub header: SnapHeader,
    /// Destination address, low `dab` bytes used
    pub dest_address: u32,
    /// Source address, low `sab` bytes used
    pub source_address: u32,
    /// Protocol flags, low `pfb` bytes used
    pub protocol_flags: u32,
    /// Payload bytes (0..=512)
    pub data: &'d [u8],
    /// Zero-padding placement: after the payload (`true`) or before (`false`)
    pub padding_after: bool,
}

/// Input fields for [`SnapFrame::encapsulate_in_place`].
///
/// The payload is not passed separately: `data_size` declares how many bytes
/// at the front of the frame buffer are the payload.
#[derive(Debug, Clone, Copy)]
pub struct InPlaceFields {
    /// Header bit-fields (`ndb` derived, not read)
    pub header: SnapHeader,
    /// Destination address, low `dab` bytes used
    pub dest_address: u32,
    /// Source address, low `sab` bytes used
    pub source_address: u32,
    /// Protocol flags, low `pfb` bytes used
    pub protocol_flags: u32,
    /// Payload length currently staged at buffer offset 0
    pub data_size: u16,
    /// Zero-padding placement: after the payload (`true`) or before (`false`)
    pub padding_after: bool,
}

impl SnapFrame<'_> {
    /// Builds a frame from `fields` and returns the resulting status.
    ///
    /// On success the buffer holds the complete frame, `size` equals its
    /// length and the status is `Valid`. A payload longer than 512 bytes or a
    /// frame longer than the buffer capacity yields `ErrorOverflow` and
    /// leaves the buffer and size untouched.
    pub fn encapsulate(&mut self, fields: &SnapFields<'_>) -> SnapStatus {
        let (header, layout) = match self.prepare(&fields.header, fields.data.len()) {
            Some(prepared) => prepared,
            None => return self.status,
        };

        self.write_envelope(&header, fields.dest_address, fields.source_address,
            fields.protocol_flags, &layout);

        // Payload region: user bytes plus zero padding up to the NDB width.
        let pad = layout.data_size - fields.data.len();
        let data_region = &mut self.buffer[layout.data_offset..layout.hash_offset];
        if fields.padding_after {
            data_region[..fields.data.len()].copy_from_slice(fields.data);
            data_region[fields.data.len()..].fill(0);
        } else {
            data_region[..pad].fill(0);
            data_region[pad..].copy_from_slice(fields.data);
        }

        self.seal(&header, &layout)
    }

    /// Builds a frame around a payload already staged at the front of the
    /// frame buffer, and returns the resulting status.
    ///
    /// The payload is moved to its final offset with overlap-safe copy
    /// semantics before the header bytes overwrite the front of the buffer.
    pub fn encapsulate_in_place(&mut self, fields: &InPlaceFields) -> SnapStatus {
        let data_size = usize::from(fields.data_size);
        let (header, layout) = match self.prepare(&fields.header, data_size) {
            Some(prepared) => prepared,
            None => return self.status,
        };

        // Move the payload first: its source range overlaps the envelope.
        let pad = layout.data_size - data_size;
        let destination = if fields.padding_after {
            layout.data_offset
        } else {
            layout.data_offset + pad
        };
        self.buffer.copy_within(0..data_size, destination);
        if fields.padding_after {
            self.buffer[destination + data_size..layout.hash_offset].fill(0);
        } else {
            self.buffer[layout.data_offset..destination].fill(0);
        }

        self.write_envelope(&header, fields.dest_address, fields.source_address,
            fields.protocol_flags, &layout);

        self.seal(&header, &layout)
    }

    /// Derives the final header and layout, rejecting oversized requests.
    ///
    /// Returns `None` after setting `ErrorOverflow` when the payload has no
    /// NDB encoding or the declared frame exceeds the buffer capacity.
    fn prepare(&mut self, header: &SnapHeader, data_size: usize) -> Option<(SnapHeader, FrameLayout)> {
        if data_size > usize::from(SNAP_MAX_DATA) {
            warn!("payload of {data_size} bytes has no NDB encoding");
            self.status = SnapStatus::ErrorOverflow;
            return None;
        }

        let header = SnapHeader {
            ndb: ndb_from_data_size(data_size as u16),
            ..*header
        };
        let layout = FrameLayout::from_header(&header, self.user_hash.size());

        if layout.total > usize::from(self.max_size) {
            warn!(
                "frame of {} bytes exceeds buffer capacity {}",
                layout.total, self.max_size
            );
            self.status = SnapStatus::ErrorOverflow;
            return None;
        }
        Some((header, layout))
    }

    /// Writes sync, header, addresses and flags at their layout offsets.
    fn write_envelope(&mut self, header: &SnapHeader, dest_address: u32, source_address: u32,
        protocol_flags: u32, layout: &FrameLayout) {
        let (hdb2, hdb1) = header.to_bytes();
        self.buffer[SNAP_SYNC_OFFSET] = SNAP_SYNC;
        self.buffer[SNAP_HDB2_OFFSET] = hdb2;
        self.buffer[SNAP_HDB1_OFFSET] = hdb1;
        write_be(
            &mut self.buffer[layout.dest_offset..layout.dest_offset + layout.dest_size],
            dest_address,
        );
        write_be(
            &mut self.buffer[layout.source_offset..layout.source_offset + layout.source_size],
            source_address,
        );
        write_be(
            &mut self.buffer[layout.flags_offset..layout.flags_offset + layout.flags_size],
            protocol_flags,
        );
    }

    /// Computes and appends the hash, then marks the frame valid.
    fn seal(&mut self, header: &SnapHeader, layout: &FrameLayout) -> SnapStatus {
        if layout.hash_size > 0 {
            let hash = compute_by_edm(
                header.edm,
                &self.user_hash,
                &self.buffer[1..layout.hash_offset],
            );
            write_be(&mut self.buffer[layout.hash_offset..layout.total], hash);
        }
        self.size = layout.total as u16;
        self.status = SnapStatus::Valid;
        trace!("encapsulated {} byte frame", layout.total);
        self.status
    }
}
