//! # SNAP Field Access
//!
//! Typed accessors over a frame buffer. Each accessor derives the field's
//! offset and width from the stored header, so they work on any handle whose
//! header is complete: a decoded frame, an encapsulated frame, or a frame
//! still accumulating (in which case fields not yet received report
//! [`SnapError::ShortFrame`]).
//!
//! Error precedence matches the frame grammar: no complete header yields
//! [`SnapError::UnknownFormat`]; a field the header declares with width zero
//! yields [`SnapError::FrameFormat`]; a declared field whose bytes are not
//! all present yields [`SnapError::ShortFrame`].

use crate::error::SnapError;
use crate::snap::frame::SnapFrame;
use crate::snap::hash::compute_by_edm;
use crate::snap::header::{FrameLayout, SnapHeader};
use crate::snap::read_be;

/// Width and value of an integer frame field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapField {
    /// Field width in bytes (1..=4)
    pub size: u8,
    /// Field value, big-endian narrowed
    pub value: u32,
}

impl SnapFrame<'_> {
    /// Returns the decoded header.
    pub fn get_header(&self) -> Result<SnapHeader, SnapError> {
        self.parsed_header()
    }

    /// Returns the destination address field.
    pub fn get_dest_address(&self) -> Result<SnapField, SnapError> {
        self.integer_field(|layout| (layout.dest_offset, layout.dest_size))
    }

    /// Returns the source address field.
    pub fn get_source_address(&self) -> Result<SnapField, SnapError> {
        self.integer_field(|layout| (layout.source_offset, layout.source_size))
    }

    /// Returns the protocol flags field.
    pub fn get_protocol_flags(&self) -> Result<SnapField, SnapError> {
        self.integer_field(|layout| (layout.flags_offset, layout.flags_size))
    }

    /// Returns the embedded hash field.
    ///
    /// This reads the value stored in the frame; use
    /// [`calculate_hash`](SnapFrame::calculate_hash) to recompute it.
    pub fn get_hash(&self) -> Result<SnapField, SnapError> {
        self.integer_field(|layout| (layout.hash_offset, layout.hash_size))
    }

    /// Returns the payload region, padding included, as a borrowed slice.
    pub fn get_data(&self) -> Result<&[u8], SnapError> {
        let layout = self.layout()?;
        if layout.data_size == 0 {
            return Err(SnapError::FrameFormat);
        }
        if usize::from(self.size) < layout.data_offset + layout.data_size {
            return Err(SnapError::ShortFrame);
        }
        Ok(&self.buffer[layout.data_offset..layout.data_offset + layout.data_size])
    }

    /// Computes the hash the stored header selects, without comparing it to
    /// the embedded one.
    ///
    /// Only the covered bytes (everything between the sync byte and the hash
    /// field) need to be present, so the hash of a still-incomplete frame can
    /// be computed as soon as its payload is in.
    pub fn calculate_hash(&self) -> Result<SnapField, SnapError> {
        let header = self.parsed_header()?;
        let layout = FrameLayout::from_header(&header, self.user_hash.size());
        if layout.hash_size == 0 {
            return Err(SnapError::FrameFormat);
        }
        if usize::from(self.size) < layout.hash_offset {
            return Err(SnapError::ShortFrame);
        }
        let value = compute_by_edm(header.edm, &self.user_hash, &self.buffer[1..layout.hash_offset]);
        Ok(SnapField {
            size: layout.hash_size as u8,
            value,
        })
    }

    /// Shared integer-field read: header gate, width gate, completeness gate,
    /// then a big-endian narrow.
    fn integer_field(
        &self,
        select: impl Fn(&FrameLayout) -> (usize, usize),
    ) -> Result<SnapField, SnapError> {
        let layout = self.layout()?;
        let (offset, size) = select(&layout);
        if size == 0 {
            return Err(SnapError::FrameFormat);
        }
        if usize::from(self.size) < offset + size {
            return Err(SnapError::ShortFrame);
        }
        Ok(SnapField {
            size: size as u8,
            value: read_be(&self.buffer[offset..offset + size]),
        })
    }
}
