//! SM130 reader module protocol constants.
//!
//! Every frame to or from a reader module opens with the two header bytes
//! and closes with an 8-bit wrapping checksum; the command byte selects one
//! of the operations below.

/// First header byte of every binary frame.
pub const HEADER0: u8 = 0xFF;

/// Second (reserved) header byte of every binary frame.
pub const HEADER1: u8 = 0x00;

/// Line rate the reader modules run at.
pub const BAUD_RATE: u32 = 19_200;

pub const RESET: u8 = 0x80;
pub const FIRMWARE: u8 = 0x81;
pub const SEEK_FOR_TAG: u8 = 0x82;
pub const SELECT_TAG: u8 = 0x83;
pub const AUTHENTICATE: u8 = 0x85;
pub const READ_BLOCK: u8 = 0x86;
pub const READ_VALUE: u8 = 0x87;
pub const WRITE_BLOCK: u8 = 0x89;
pub const WRITE_VALUE: u8 = 0x8A;
pub const WRITE_4_BYTE_BLOCK: u8 = 0x8B;
pub const WRITE_KEY: u8 = 0x8C;
pub const INCREMENT: u8 = 0x8D;
pub const DECREMENT: u8 = 0x8E;
pub const ANTENNA_POWER: u8 = 0x90;
pub const READ_PORT: u8 = 0x91;
pub const WRITE_PORT: u8 = 0x92;
pub const HALT: u8 = 0x93;
pub const SET_BAUD_RATE: u8 = 0x94;
pub const SLEEP: u8 = 0x96;

/// Returns a human-readable name for a command byte.
pub fn command_name(cmd: u8) -> &'static str {
    match cmd {
        RESET => "RESET",
        FIRMWARE => "FIRMWARE",
        SEEK_FOR_TAG => "SEEK_FOR_TAG",
        SELECT_TAG => "SELECT_TAG",
        AUTHENTICATE => "AUTHENTICATE",
        READ_BLOCK => "READ_BLOCK",
        READ_VALUE => "READ_VALUE",
        WRITE_BLOCK => "WRITE_BLOCK",
        WRITE_VALUE => "WRITE_VALUE",
        WRITE_4_BYTE_BLOCK => "WRITE_4_BYTE_BLOCK",
        WRITE_KEY => "WRITE_KEY",
        INCREMENT => "INCREMENT",
        DECREMENT => "DECREMENT",
        ANTENNA_POWER => "ANTENNA_POWER",
        READ_PORT => "READ_PORT",
        WRITE_PORT => "WRITE_PORT",
        HALT => "HALT",
        SET_BAUD_RATE => "SET_BAUD_RATE",
        SLEEP => "SLEEP",
        _ => "UNKNOWN",
    }
}

/// Looks a command byte up by name, case-insensitively.
pub fn command_byte(name: &str) -> Option<u8> {
    let upper = name.to_ascii_uppercase();
    match upper.as_str() {
        "RESET" => Some(RESET),
        "FIRMWARE" => Some(FIRMWARE),
        "SEEK_FOR_TAG" | "SEEK" => Some(SEEK_FOR_TAG),
        "SELECT_TAG" | "SELECT" => Some(SELECT_TAG),
        "AUTHENTICATE" => Some(AUTHENTICATE),
        "READ_BLOCK" => Some(READ_BLOCK),
        "READ_VALUE" => Some(READ_VALUE),
        "WRITE_BLOCK" => Some(WRITE_BLOCK),
        "WRITE_VALUE" => Some(WRITE_VALUE),
        "WRITE_4_BYTE_BLOCK" => Some(WRITE_4_BYTE_BLOCK),
        "WRITE_KEY" => Some(WRITE_KEY),
        "INCREMENT" => Some(INCREMENT),
        "DECREMENT" => Some(DECREMENT),
        "ANTENNA_POWER" | "ANTENNA" => Some(ANTENNA_POWER),
        "READ_PORT" => Some(READ_PORT),
        "WRITE_PORT" => Some(WRITE_PORT),
        "HALT" => Some(HALT),
        "SET_BAUD_RATE" => Some(SET_BAUD_RATE),
        "SLEEP" => Some(SLEEP),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_bytes_round_trip() {
        for cmd in [RESET, SEEK_FOR_TAG, ANTENNA_POWER, SLEEP] {
            let name = command_name(cmd);
            assert_eq!(command_byte(name), Some(cmd));
        }
    }

    #[test]
    fn lookup_accepts_short_aliases() {
        assert_eq!(command_byte("seek"), Some(SEEK_FOR_TAG));
        assert_eq!(command_byte("antenna"), Some(ANTENNA_POWER));
        assert_eq!(command_byte("bogus"), None);
    }

    #[test]
    fn unknown_command_has_placeholder_name() {
        assert_eq!(command_name(0x42), "UNKNOWN");
    }
}
