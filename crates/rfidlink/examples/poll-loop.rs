//! Loopback poll loop — a dispatcher querying a pretend reader module.
//!
//! Run with:
//!   cargo run --example poll-loop

use bytes::BytesMut;
use rfidlink::frame::{command, encode_command, write_command, ChannelConfig, FrameReader, Poll};
use rfidlink::port::{MemPort, SerialPort};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (mut dispatcher_side, mut module_side) = MemPort::pair();

    // The dispatcher asks for the firmware version.
    write_command(&mut dispatcher_side, command::FIRMWARE, &[])?;

    // The pretend module drains the request and answers in kind.
    let request: Vec<u8> = std::iter::from_fn(|| module_side.read()).collect();
    eprintln!(
        "[module] received {} ({} bytes)",
        command::command_name(request[3]),
        request.len()
    );
    let mut reply = BytesMut::new();
    encode_command(command::FIRMWARE, b"2.8", &mut reply)?;
    module_side.write_all(&reply)?;

    // The dispatcher polls one byte at a time until the reply frame lands.
    let mut reader = FrameReader::binary(dispatcher_side, ChannelConfig::default());
    let len = loop {
        match reader.poll()? {
            Poll::Complete(len) => break len,
            Poll::Pending => {}
        }
    };

    let frame = &reader.data()[..len];
    eprintln!(
        "[dispatcher] {} reply, payload {}",
        command::command_name(frame[3]),
        String::from_utf8_lossy(&frame[4..len - 1])
    );
    Ok(())
}
