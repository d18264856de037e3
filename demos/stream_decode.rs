//! Streaming decode walk-through: feed a noisy byte stream (preamble, frame,
//! postamble) one byte at a time and read the fields back out of the
//! completed frame.
//!
//! Run with `cargo run --example stream_decode`.

use snap_rs::{SnapError, SnapFrame, SnapStatus};

fn main() -> Result<(), SnapError> {
    snap_rs::init_logger();

    // Preamble noise, then a 27-byte frame with a 16-bit CRC, then postamble.
    let stream = [
        0x00, 0x11, 0x22, // preamble
        0x54, 0x6C, 0x49, 0xA0, 0xB0, 0xB1, 0xC0, 0xC1, 0xC2, 0xD0, 0xD1, 0xD2, 0xD3, 0xD4,
        0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xE6, 0xEB,
        0xFF, 0xEE, // postamble
    ];

    let mut buffer = [0u8; 50];
    let mut frame = SnapFrame::new(&mut buffer)?;

    let mut last = SnapStatus::Idle;
    for byte in stream {
        let status = frame.decode(byte);
        if status != last {
            println!("byte 0x{byte:02X}: status -> {status}");
            last = status;
        }
    }

    if frame.status() != SnapStatus::Valid {
        println!("No valid frame received.");
        return Ok(());
    }

    let header = frame.get_header()?;
    println!(
        "Header: dab={} sab={} pfb={} ack={} cmd={} edm={} ndb={}",
        header.dab, header.sab, header.pfb, header.ack, header.cmd, header.edm, header.ndb
    );

    let dest = frame.get_dest_address()?;
    println!("Destination address: {:#0width$X}", dest.value, width = 2 + 2 * dest.size as usize);

    let source = frame.get_source_address()?;
    println!("Source address: {:#0width$X}", source.value, width = 2 + 2 * source.size as usize);

    let flags = frame.get_protocol_flags()?;
    println!("Protocol flags: {:#0width$X}", flags.value, width = 2 + 2 * flags.size as usize);

    let mut data = frame.get_data()?.to_vec();
    let len = snap_rs::remove_padding(&mut data, true);
    println!("Payload ({len} bytes after padding removal): {:02X?}", &data[..len]);

    let embedded = frame.get_hash()?;
    let computed = frame.calculate_hash()?;
    println!(
        "Hash: embedded {:#06X}, computed {:#06X}",
        embedded.value, computed.value
    );

    Ok(())
}
