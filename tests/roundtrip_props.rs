//! Property tests for the framing algebra: encode/decode round-trips,
//! preamble invariance, sticky terminal states, hash sensitivity, and the
//! NDB inverse bound.

use proptest::prelude::*;
use snap_rs::{
    data_size_from_ndb, ndb_from_data_size, remove_padding, InPlaceFields, SnapFields, SnapFrame,
    SnapHeader, SnapStatus, SNAP_MAX_FRAME,
};

/// Mask for the low `width` bytes of a field value.
fn width_mask(width: u8) -> u32 {
    match width {
        0 => 0,
        4 => u32::MAX,
        _ => (1u32 << (8 * width)) - 1,
    }
}

prop_compose! {
    /// An arbitrary encapsulation request over the full header space, with
    /// payloads spanning the exact (<= 8) and padded (> 8) NDB ranges.
    fn arb_fields()(
        dab in 0u8..=3,
        sab in 0u8..=3,
        pfb in 0u8..=3,
        ack in 0u8..=3,
        cmd in 0u8..=1,
        edm in 0u8..=7,
        dest_address in any::<u32>(),
        source_address in any::<u32>(),
        protocol_flags in any::<u32>(),
        data in prop::collection::vec(any::<u8>(), 0..=40),
        padding_after in any::<bool>(),
    ) -> (SnapHeader, u32, u32, u32, Vec<u8>, bool) {
        let header = SnapHeader { dab, sab, pfb, ack, cmd, edm, ndb: 0 };
        (header, dest_address, source_address, protocol_flags, data, padding_after)
    }
}

proptest! {
    /// Every encapsulated frame decodes back to `Valid`, and the accessors
    /// reproduce the inputs (addresses at field width, payload with its
    /// declared padding).
    #[test]
    fn roundtrip((header, dest, source, flags, data, padding_after) in arb_fields()) {
        let mut tx_buffer = [0u8; SNAP_MAX_FRAME as usize];
        let mut tx = SnapFrame::new(&mut tx_buffer).unwrap();
        let fields = SnapFields {
            header,
            dest_address: dest,
            source_address: source,
            protocol_flags: flags,
            data: &data,
            padding_after,
        };
        prop_assert_eq!(tx.encapsulate(&fields), SnapStatus::Valid);
        let wire = tx.frame_bytes().to_vec();

        let mut rx_buffer = [0u8; SNAP_MAX_FRAME as usize];
        let mut rx = SnapFrame::new(&mut rx_buffer).unwrap();
        for &byte in &wire {
            rx.decode(byte);
        }
        prop_assert_eq!(rx.status(), SnapStatus::Valid);
        prop_assert_eq!(rx.frame_bytes(), &wire[..]);

        let decoded_header = rx.get_header().unwrap();
        prop_assert_eq!(decoded_header.dab, header.dab);
        prop_assert_eq!(decoded_header.sab, header.sab);
        prop_assert_eq!(decoded_header.pfb, header.pfb);
        prop_assert_eq!(decoded_header.ack, header.ack);
        prop_assert_eq!(decoded_header.cmd, header.cmd);
        prop_assert_eq!(decoded_header.edm, header.edm);
        prop_assert_eq!(decoded_header.ndb, ndb_from_data_size(data.len() as u16));

        if header.dab > 0 {
            prop_assert_eq!(rx.get_dest_address().unwrap().value, dest & width_mask(header.dab));
        }
        if header.sab > 0 {
            prop_assert_eq!(rx.get_source_address().unwrap().value, source & width_mask(header.sab));
        }
        if header.pfb > 0 {
            prop_assert_eq!(rx.get_protocol_flags().unwrap().value, flags & width_mask(header.pfb));
        }

        if !data.is_empty() {
            let width = usize::from(data_size_from_ndb(decoded_header.ndb));
            let mut expected = vec![0u8; width];
            if padding_after {
                expected[..data.len()].copy_from_slice(&data);
            } else {
                expected[width - data.len()..].copy_from_slice(&data);
            }
            prop_assert_eq!(rx.get_data().unwrap(), &expected[..]);
        }
    }

    /// Preamble bytes that are not the sync byte never affect the decoded
    /// frame.
    #[test]
    fn preamble_invariance(
        preamble in prop::collection::vec(any::<u8>().prop_filter("no sync", |&b| b != 0x54), 0..=32),
        data in prop::collection::vec(any::<u8>(), 0..=20),
    ) {
        let mut tx_buffer = [0u8; SNAP_MAX_FRAME as usize];
        let mut tx = SnapFrame::new(&mut tx_buffer).unwrap();
        tx.encapsulate(&SnapFields {
            header: SnapHeader { dab: 1, sab: 1, pfb: 0, ack: 0, cmd: 0, edm: 4, ndb: 0 },
            dest_address: 0xA0,
            source_address: 0xB1,
            protocol_flags: 0,
            data: &data,
            padding_after: true,
        });
        let wire = tx.frame_bytes().to_vec();

        let mut plain_buffer = [0u8; SNAP_MAX_FRAME as usize];
        let mut plain = SnapFrame::new(&mut plain_buffer).unwrap();
        for &byte in &wire {
            plain.decode(byte);
        }

        let mut noisy_buffer = [0u8; SNAP_MAX_FRAME as usize];
        let mut noisy = SnapFrame::new(&mut noisy_buffer).unwrap();
        for &byte in preamble.iter().chain(&wire) {
            noisy.decode(byte);
        }

        prop_assert_eq!(noisy.status(), plain.status());
        prop_assert_eq!(noisy.frame_bytes(), plain.frame_bytes());
    }

    /// Once a frame settles, arbitrary postamble input changes nothing.
    #[test]
    fn terminal_states_are_sticky(
        postamble in prop::collection::vec(any::<u8>(), 1..=64),
        corrupt in any::<bool>(),
    ) {
        let mut wire = vec![0x54, 0x00, 0x40, 0x48, 0xC4];
        if corrupt {
            *wire.last_mut().unwrap() ^= 0x01;
        }

        let mut buffer = [0u8; 16];
        let mut frame = SnapFrame::new(&mut buffer).unwrap();
        for &byte in &wire {
            frame.decode(byte);
        }
        let settled = frame.status();
        prop_assert!(settled.is_terminal());

        for &byte in &postamble {
            prop_assert_eq!(frame.decode(byte), settled);
        }
        prop_assert_eq!(frame.frame_bytes(), &wire[..]);
    }

    /// Flipping any covered body bit of a hashed frame drives decode to
    /// `ErrorHash`. Header bits are excluded: flipping those changes the
    /// declared frame geometry rather than corrupting a fixed one.
    #[test]
    fn hash_sensitivity(bit in (3 * 8)..(25usize * 8)) {
        // Scenario frame: 27 bytes, CRC-16 over bytes 1..25.
        let mut wire = vec![
            0x54, 0x6C, 0x49, 0xA0, 0xB0, 0xB1, 0xC0, 0xC1, 0xC2, 0xD0, 0xD1, 0xD2, 0xD3, 0xD4,
            0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xE6, 0xEB,
        ];
        wire[bit / 8] ^= 1 << (bit % 8);

        let mut buffer = [0u8; SNAP_MAX_FRAME as usize];
        let mut frame = SnapFrame::new(&mut buffer).unwrap();
        for &byte in &wire {
            frame.decode(byte);
        }
        prop_assert_eq!(frame.status(), SnapStatus::ErrorHash);
    }

    /// The NDB code for a size always covers it, with the smallest width in
    /// the allowed set.
    #[test]
    fn ndb_inverse(size in 0u16..=512) {
        let ndb = ndb_from_data_size(size);
        let width = data_size_from_ndb(ndb);
        prop_assert!(width >= size);
        if ndb > 0 {
            prop_assert!(data_size_from_ndb(ndb - 1) < size);
        }
    }

    /// In-place encapsulation produces byte-identical frames to the
    /// disjoint-buffer mode.
    #[test]
    fn in_place_equivalence(
        data in prop::collection::vec(any::<u8>(), 0..=40),
        padding_after in any::<bool>(),
    ) {
        let header = SnapHeader { dab: 1, sab: 2, pfb: 0, ack: 0, cmd: 0, edm: 3, ndb: 0 };

        let mut disjoint_buffer = [0u8; SNAP_MAX_FRAME as usize];
        let mut disjoint = SnapFrame::new(&mut disjoint_buffer).unwrap();
        prop_assert_eq!(
            disjoint.encapsulate(&SnapFields {
                header,
                dest_address: 0xA1,
                source_address: 0xB1B2,
                protocol_flags: 0,
                data: &data,
                padding_after,
            }),
            SnapStatus::Valid
        );

        let mut aliased_buffer = [0u8; SNAP_MAX_FRAME as usize];
        aliased_buffer[..data.len()].copy_from_slice(&data);
        let mut aliased = SnapFrame::new(&mut aliased_buffer).unwrap();
        prop_assert_eq!(
            aliased.encapsulate_in_place(&InPlaceFields {
                header,
                dest_address: 0xA1,
                source_address: 0xB1B2,
                protocol_flags: 0,
                data_size: data.len() as u16,
                padding_after,
            }),
            SnapStatus::Valid
        );

        prop_assert_eq!(disjoint.frame_bytes(), aliased.frame_bytes());
    }

    /// Stripping the padding an encapsulation added recovers the payload
    /// length (payloads chosen with a non-zero edge byte).
    #[test]
    fn padding_strip_recovers_payload(
        mut data in prop::collection::vec(any::<u8>(), 9..=40),
        padding_after in any::<bool>(),
    ) {
        // Pin the payload edge so user bytes are distinguishable from padding.
        if padding_after {
            *data.last_mut().unwrap() = 0xA5;
        } else {
            data[0] = 0xA5;
        }

        let mut buffer = [0u8; SNAP_MAX_FRAME as usize];
        let mut frame = SnapFrame::new(&mut buffer).unwrap();
        frame.encapsulate(&SnapFields {
            header: SnapHeader { dab: 0, sab: 0, pfb: 0, ack: 0, cmd: 0, edm: 0, ndb: 0 },
            dest_address: 0,
            source_address: 0,
            protocol_flags: 0,
            data: &data,
            padding_after,
        });

        let mut padded = frame.get_data().unwrap().to_vec();
        let stripped = remove_padding(&mut padded, padding_after);
        prop_assert_eq!(stripped, data.len());
        if padding_after {
            prop_assert_eq!(&padded[..stripped], &data[..]);
        }
    }
}
