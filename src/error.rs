//! # SNAP Error Handling
//!
//! This module defines the SnapError enum, which represents the different error
//! types that can occur in the snap-rs crate.
//!
//! Integrity and capacity failures discovered while a frame is being built or
//! received are not errors in this sense: they are terminal frame statuses
//! (`SnapStatus::ErrorHash`, `SnapStatus::ErrorOverflow`) that stay on the
//! handle until it is reset.

use thiserror::Error;

/// Represents the different error types that can occur in the SNAP crate.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapError {
    /// Indicates a frame buffer smaller than the minimum frame size.
    #[error("Buffer too short: {size} bytes, minimum is {minimum}")]
    ShortBuffer { size: usize, minimum: usize },

    /// Indicates a field access on a frame without a complete header.
    #[error("Frame format unknown: complete header not yet received")]
    UnknownFormat,

    /// Indicates a field access the current header declares with zero width.
    #[error("Frame format does not include the requested field")]
    FrameFormat,

    /// Indicates a field declared by the header whose bytes are not all present.
    #[error("Frame too short: requested field not fully received")]
    ShortFrame,
}
