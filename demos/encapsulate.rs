//! Frame encapsulation walk-through: build a frame with a 16-bit CRC into a
//! caller-provided buffer and print the resulting bytes.
//!
//! Run with `cargo run --example encapsulate`.

use snap_rs::util::hex::format_hex_compact;
use snap_rs::{SnapError, SnapFields, SnapFrame, SnapHeader, SnapStatus};

fn main() -> Result<(), SnapError> {
    snap_rs::init_logger();

    let data = [0xD0, 0xD1, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9];
    let mut buffer = [0u8; 50];
    let mut frame = SnapFrame::new(&mut buffer)?;

    println!("Frame initialized, capacity = {}", frame.capacity());

    let fields = SnapFields {
        header: SnapHeader {
            dab: 1, // 1-byte destination address
            sab: 2, // 2-byte source address
            pfb: 3, // 3-byte protocol flags
            ack: 0,
            cmd: 0,
            edm: 4, // CRC-16/XMODEM
            ndb: 0, // derived from the payload length
        },
        dest_address: 0xA0,
        source_address: 0xB0B1,
        protocol_flags: 0xC0C1C2,
        data: &data,
        padding_after: true,
    };

    match frame.encapsulate(&fields) {
        SnapStatus::Valid => println!("Frame encapsulation succeeded."),
        SnapStatus::ErrorOverflow => {
            println!("Frame encapsulation failed: buffer cannot hold the complete frame.");
            return Ok(());
        }
        other => println!("Unexpected status: {other}"),
    }

    println!(
        "Frame: status = {}, size = {}, buffer = {}",
        frame.status(),
        frame.size(),
        format_hex_compact(frame.frame_bytes())
    );

    Ok(())
}
