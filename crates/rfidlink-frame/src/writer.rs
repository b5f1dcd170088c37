use bytes::{BufMut, BytesMut};
use rfidlink_port::SerialPort;
use tracing::debug;

use crate::command::{self, HEADER0, HEADER1};
use crate::error::{FrameError, Result};

/// Encode a command frame into the binary wire format.
///
/// The count field covers the command byte plus the data, and the checksum
/// is the 8-bit wrapping sum of count, command, and data.
pub fn encode_command(cmd: u8, data: &[u8], dst: &mut BytesMut) -> Result<()> {
    let count = data.len() + 1;
    if count > usize::from(u8::MAX) {
        return Err(FrameError::CountOverflow {
            count,
            max: usize::from(u8::MAX),
        });
    }

    dst.reserve(4 + count);
    dst.put_u8(HEADER0);
    dst.put_u8(HEADER1);
    dst.put_u8(count as u8);
    dst.put_u8(cmd);
    let mut checksum = (count as u8).wrapping_add(cmd);
    for &byte in data {
        checksum = checksum.wrapping_add(byte);
        dst.put_u8(byte);
    }
    dst.put_u8(checksum);
    Ok(())
}

/// Encode and transmit a command frame.
pub fn write_command<P: SerialPort>(port: &mut P, cmd: u8, data: &[u8]) -> Result<()> {
    let mut wire = BytesMut::with_capacity(4 + data.len() + 1);
    encode_command(cmd, data, &mut wire)?;
    port.write_all(&wire)?;
    debug!(
        cmd = command::command_name(cmd),
        len = wire.len(),
        "command frame written"
    );
    Ok(())
}

/// Bring a reader module up: set the line rate, drain whatever is sitting in
/// the receive FIFO, and issue the startup command sequence.
pub fn init_reader<P: SerialPort>(port: &mut P) -> Result<()> {
    port.begin(command::BAUD_RATE)?;
    while port.read().is_some() {}

    write_command(port, command::FIRMWARE, &[])?;
    write_command(port, command::ANTENNA_POWER, &[1])?;
    write_command(port, command::SEEK_FOR_TAG, &[])?;
    debug!("reader module initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rfidlink_port::MemPort;

    use super::*;

    #[test]
    fn encoded_frame_matches_wire_layout() {
        let mut wire = BytesMut::new();
        encode_command(command::SEEK_FOR_TAG, &[0x4C, 0x01], &mut wire).unwrap();

        assert_eq!(
            wire.as_ref(),
            &[0xFF, 0x00, 0x03, 0x82, 0x4C, 0x01, 0xD2][..]
        );
    }

    #[test]
    fn dataless_command_has_count_one() {
        let mut wire = BytesMut::new();
        encode_command(command::FIRMWARE, &[], &mut wire).unwrap();

        assert_eq!(wire.as_ref(), &[0xFF, 0x00, 0x01, 0x81, 0x82][..]);
    }

    #[test]
    fn checksum_wraps_modulo_256() {
        let mut wire = BytesMut::new();
        encode_command(0xFF, &[0xFF, 0xFF], &mut wire).unwrap();

        // 3 + 0xFF + 0xFF + 0xFF = 0x300 -> 0x00 after wraparound.
        assert_eq!(wire.as_ref(), &[0xFF, 0x00, 0x03, 0xFF, 0xFF, 0xFF, 0x00][..]);
    }

    #[test]
    fn oversized_data_rejected() {
        let mut wire = BytesMut::new();
        let data = vec![0u8; 255];
        let err = encode_command(command::WRITE_BLOCK, &data, &mut wire).unwrap_err();
        assert!(matches!(err, FrameError::CountOverflow { count: 256, .. }));
    }

    #[test]
    fn write_command_hits_the_port() {
        let mut port = MemPort::new();
        write_command(&mut port, command::RESET, &[]).unwrap();

        assert_eq!(port.drain_sent(), vec![0xFF, 0x00, 0x01, 0x80, 0x81]);
    }

    #[test]
    fn init_drains_fifo_and_sends_startup_sequence() {
        let mut port = MemPort::new();
        port.feed(&[0xDE, 0xAD]);

        init_reader(&mut port).unwrap();

        assert_eq!(port.baud(), Some(command::BAUD_RATE));
        assert_eq!(port.pending(), 0);

        let sent = port.drain_sent();
        // Firmware query, antenna power on, seek.
        let mut expected = BytesMut::new();
        encode_command(command::FIRMWARE, &[], &mut expected).unwrap();
        encode_command(command::ANTENNA_POWER, &[1], &mut expected).unwrap();
        encode_command(command::SEEK_FOR_TAG, &[], &mut expected).unwrap();
        assert_eq!(sent, expected.to_vec());
    }
}
