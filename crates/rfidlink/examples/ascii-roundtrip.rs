//! ASCII transport round trip — encode, push through a line reader, decode.
//!
//! Run with:
//!   cargo run --example ascii-roundtrip

use bytes::BytesMut;
use rfidlink::frame::{codec, ChannelConfig, LineFrameReader, Poll, TransportMode};
use rfidlink::port::MemPort;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut wire = BytesMut::new();
    codec::encode(*b"RR", 1, &[0x01, 0xFF], TransportMode::Hex, &mut wire)?;
    eprintln!(
        "[host] sends: {:?}",
        String::from_utf8_lossy(&wire[..wire.len() - 1])
    );

    let mut port = MemPort::new();
    port.feed(&wire);

    // The NUL terminator delimits the line; the reader strips it.
    let mut reader = LineFrameReader::new(port, ChannelConfig::default());
    let len = loop {
        match reader.poll()? {
            Poll::Complete(len) => break len,
            Poll::Pending => {}
        }
    };

    let message = codec::decode(&reader.data()[..len])?;
    eprintln!(
        "[dispatcher] tag={} subcode={} payload={}",
        String::from_utf8_lossy(&message.tag),
        message.subcode,
        message
            .payload
            .iter()
            .map(|byte| format!("{byte:02X}"))
            .collect::<Vec<_>>()
            .join(" ")
    );
    Ok(())
}
