//! # SNAP Header Codec
//!
//! The two header bytes (HDB2, HDB1) carry seven bit-fields that together
//! determine the layout and total length of a frame:
//!
//! ```text
//! HDB2: | DAB(2) | SAB(2) | PFB(2) | ACK(2) |
//! HDB1: | CMD(1) | EDM(3) |     NDB(4)      |
//! ```
//!
//! DAB/SAB/PFB select the byte widths (0..3) of the destination address,
//! source address and protocol flags. NDB selects the payload width through a
//! nonlinear code (0..8 bytes directly, then powers of two up to 512). EDM
//! selects the error detection mode and thereby the hash width. ACK and CMD
//! are carried verbatim and assigned no semantics by this layer.
//!
//! All packing uses explicit masks and shifts from [`crate::constants`];
//! the layout never depends on language-level bit-field representation.

use crate::constants::{
    SNAP_BODY_OFFSET, SNAP_EDM_CHECKSUM8, SNAP_EDM_CRC16, SNAP_EDM_CRC32, SNAP_EDM_CRC8,
    SNAP_EDM_USER, SNAP_HDB1_CMD_MASK, SNAP_HDB1_CMD_SHIFT, SNAP_HDB1_EDM_MASK,
    SNAP_HDB1_EDM_SHIFT, SNAP_HDB1_NDB_MASK, SNAP_HDB2_ACK_MASK, SNAP_HDB2_DAB_MASK,
    SNAP_HDB2_DAB_SHIFT, SNAP_HDB2_PFB_MASK, SNAP_HDB2_PFB_SHIFT, SNAP_HDB2_SAB_MASK,
    SNAP_HDB2_SAB_SHIFT, SNAP_MAX_DATA,
};

/// Decoded form of the two SNAP header bytes.
///
/// When used as encapsulation input, `ndb` is ignored: the encoder derives it
/// from the payload length so the header can never disagree with the data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SnapHeader {
    /// Destination address width code (0..3 bytes)
    pub dab: u8,
    /// Source address width code (0..3 bytes)
    pub sab: u8,
    /// Protocol flags width code (0..3 bytes)
    pub pfb: u8,
    /// ACK/NAK bits, carried verbatim
    pub ack: u8,
    /// Command mode bit, carried verbatim
    pub cmd: u8,
    /// Error detection mode
    pub edm: u8,
    /// Number-of-data-bytes code
    pub ndb: u8,
}

impl SnapHeader {
    /// Decodes the header from its two wire bytes.
    pub fn from_bytes(hdb2: u8, hdb1: u8) -> Self {
        SnapHeader {
            dab: (hdb2 & SNAP_HDB2_DAB_MASK) >> SNAP_HDB2_DAB_SHIFT,
            sab: (hdb2 & SNAP_HDB2_SAB_MASK) >> SNAP_HDB2_SAB_SHIFT,
            pfb: (hdb2 & SNAP_HDB2_PFB_MASK) >> SNAP_HDB2_PFB_SHIFT,
            ack: hdb2 & SNAP_HDB2_ACK_MASK,
            cmd: (hdb1 & SNAP_HDB1_CMD_MASK) >> SNAP_HDB1_CMD_SHIFT,
            edm: (hdb1 & SNAP_HDB1_EDM_MASK) >> SNAP_HDB1_EDM_SHIFT,
            ndb: hdb1 & SNAP_HDB1_NDB_MASK,
        }
    }

    /// Packs the header into its two wire bytes `(HDB2, HDB1)`.
    ///
    /// Field values wider than their bit-field are truncated by the masks.
    pub fn to_bytes(&self) -> (u8, u8) {
        let hdb2 = ((self.dab << SNAP_HDB2_DAB_SHIFT) & SNAP_HDB2_DAB_MASK)
            | ((self.sab << SNAP_HDB2_SAB_SHIFT) & SNAP_HDB2_SAB_MASK)
            | ((self.pfb << SNAP_HDB2_PFB_SHIFT) & SNAP_HDB2_PFB_MASK)
            | (self.ack & SNAP_HDB2_ACK_MASK);
        let hdb1 = ((self.cmd << SNAP_HDB1_CMD_SHIFT) & SNAP_HDB1_CMD_MASK)
            | ((self.edm << SNAP_HDB1_EDM_SHIFT) & SNAP_HDB1_EDM_MASK)
            | (self.ndb & SNAP_HDB1_NDB_MASK);
        (hdb2, hdb1)
    }
}

/// Returns the smallest NDB code whose payload width covers `data_size`.
///
/// Sizes above 512 have no encoding and map to 0, the same accounting the
/// reverse table applies to the reserved codes.
pub fn ndb_from_data_size(data_size: u16) -> u8 {
    match data_size {
        0..=8 => data_size as u8,
        9..=16 => 9,
        17..=32 => 10,
        33..=64 => 11,
        65..=128 => 12,
        129..=256 => 13,
        257..=512 => 14,
        _ => 0,
    }
}

/// Returns the payload width in bytes selected by an NDB code.
///
/// Codes 15..255 are reserved and yield an empty payload.
pub fn data_size_from_ndb(ndb: u8) -> u16 {
    match ndb {
        0..=8 => u16::from(ndb),
        9..=14 => 1u16 << (ndb - 5),
        _ => 0,
    }
}

/// Returns the hash width in bytes selected by an EDM value.
///
/// Modes 0 (none), 1 (three-times retransmission) and 6 (reserved) place no
/// hash bytes in the frame. Mode 7 uses the width of the installed user hash.
pub fn hash_size_from_edm(edm: u8, user_hash_size: u8) -> u8 {
    match edm {
        SNAP_EDM_CHECKSUM8 | SNAP_EDM_CRC8 => 1,
        SNAP_EDM_CRC16 => 2,
        SNAP_EDM_CRC32 => 4,
        SNAP_EDM_USER => user_hash_size,
        _ => 0,
    }
}

/// Byte offsets and widths of every frame field, derived from a header.
///
/// Offsets are absolute buffer positions; a zero-width field shares its
/// offset with the next one. `total` is the complete frame length including
/// the sync byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// Offset of the destination address field
    pub dest_offset: usize,
    /// Width of the destination address field
    pub dest_size: usize,
    /// Offset of the source address field
    pub source_offset: usize,
    /// Width of the source address field
    pub source_size: usize,
    /// Offset of the protocol flags field
    pub flags_offset: usize,
    /// Width of the protocol flags field
    pub flags_size: usize,
    /// Offset of the payload field
    pub data_offset: usize,
    /// Width of the payload field (padded, per the NDB code)
    pub data_size: usize,
    /// Offset of the hash field
    pub hash_offset: usize,
    /// Width of the hash field
    pub hash_size: usize,
    /// Total frame length, sync byte included
    pub total: usize,
}

impl FrameLayout {
    /// Computes the layout a header declares.
    pub fn from_header(header: &SnapHeader, user_hash_size: u8) -> Self {
        let dest_offset = SNAP_BODY_OFFSET;
        let dest_size = usize::from(header.dab);
        let source_offset = dest_offset + dest_size;
        let source_size = usize::from(header.sab);
        let flags_offset = source_offset + source_size;
        let flags_size = usize::from(header.pfb);
        let data_offset = flags_offset + flags_size;
        let data_size = usize::from(data_size_from_ndb(header.ndb));
        let hash_offset = data_offset + data_size;
        let hash_size = usize::from(hash_size_from_edm(header.edm, user_hash_size));
        FrameLayout {
            dest_offset,
            dest_size,
            source_offset,
            source_size,
            flags_offset,
            flags_size,
            data_offset,
            data_size,
            hash_offset,
            hash_size,
            total: hash_offset + hash_size,
        }
    }
}
