//! ASCII transport codec for the host side.
//!
//! A payload crosses the line-oriented transport as:
//! ```text
//! <2-char tag> <digit subcode> <±decimal length> <payload> <2-hex checksum>\0
//! ```
//! A negated length marks a hex-rendered payload (`XX ` per byte, uppercase,
//! a space after every byte); a positive length marks literal payload bytes
//! followed by one space. The checksum byte balances the message: the 8-bit
//! wrapping sum of every byte up to the checksum field, plus the checksum
//! byte itself, is zero.

use bytes::{BufMut, BytesMut};

use crate::channel::TransportMode;
use crate::error::CodecError;

/// Largest payload the 4-digit decimal length field can declare.
pub const MAX_LENGTH: usize = 9999;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// A decoded ASCII transport message. Constructed transiently on decode and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Two-character device tag.
    pub tag: [u8; 2],
    /// Single-digit subcode, 0-9.
    pub subcode: u8,
    /// Payload bytes, already de-hexed when the message was hex mode.
    pub payload: Vec<u8>,
    /// Which rendering the payload arrived in.
    pub mode: TransportMode,
}

/// Encode a payload into the ASCII wire form, appending to `dst`.
///
/// The NUL terminator is included, ready for a line-oriented transport.
pub fn encode(
    tag: [u8; 2],
    subcode: u8,
    payload: &[u8],
    mode: TransportMode,
    dst: &mut BytesMut,
) -> Result<(), CodecError> {
    if let Some(&bad) = tag.iter().find(|byte| !byte.is_ascii_graphic()) {
        return Err(CodecError::Tag { got: bad });
    }
    if subcode > 9 {
        return Err(CodecError::Subcode { got: subcode });
    }
    if payload.len() > MAX_LENGTH {
        return Err(CodecError::LengthRange {
            len: payload.len(),
            max: MAX_LENGTH,
        });
    }

    let start = dst.len();
    dst.put_slice(&tag);
    dst.put_u8(b' ');
    dst.put_u8(b'0' + subcode);
    dst.put_u8(b' ');
    match mode {
        TransportMode::Hex => {
            dst.put_slice(format!("-{}", payload.len()).as_bytes());
            dst.put_u8(b' ');
            for &byte in payload {
                put_hex(dst, byte);
                dst.put_u8(b' ');
            }
        }
        TransportMode::Literal => {
            dst.put_slice(format!("{}", payload.len()).as_bytes());
            dst.put_u8(b' ');
            dst.put_slice(payload);
            dst.put_u8(b' ');
        }
    }

    let sum = dst[start..].iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    put_hex(dst, sum.wrapping_neg());
    dst.put_u8(0);
    Ok(())
}

/// Decode one ASCII transport message, as delimited by a line reader.
///
/// A trailing NUL is tolerated but not required; the line reader usually
/// consumes it as the terminator.
pub fn decode(src: &[u8]) -> Result<Message, CodecError> {
    let mut pos = 0usize;

    let mut tag = [0u8; 2];
    for slot in &mut tag {
        let byte = take(src, &mut pos)?;
        if !byte.is_ascii_graphic() {
            return Err(CodecError::Tag { got: byte });
        }
        *slot = byte;
    }
    expect_space(src, &mut pos)?;

    let byte = take(src, &mut pos)?;
    if !byte.is_ascii_digit() {
        return Err(CodecError::Subcode { got: byte });
    }
    let subcode = byte - b'0';
    expect_space(src, &mut pos)?;

    let mode = if src.get(pos) == Some(&b'-') {
        pos += 1;
        TransportMode::Hex
    } else {
        TransportMode::Literal
    };

    let mut digits = 0usize;
    let mut length = 0usize;
    while let Some(&byte) = src.get(pos) {
        if !byte.is_ascii_digit() {
            break;
        }
        digits += 1;
        if digits > 4 {
            return Err(CodecError::Length);
        }
        length = length * 10 + usize::from(byte - b'0');
        pos += 1;
    }
    if digits == 0 {
        return Err(CodecError::Length);
    }
    expect_space(src, &mut pos)?;

    let mut payload = Vec::with_capacity(length);
    match mode {
        TransportMode::Hex => {
            for _ in 0..length {
                let hi = hex_value(take(src, &mut pos)?)?;
                let lo = hex_value(take(src, &mut pos)?)?;
                payload.push(hi << 4 | lo);
                expect_space(src, &mut pos)?;
            }
        }
        TransportMode::Literal => {
            for _ in 0..length {
                payload.push(take(src, &mut pos)?);
            }
            expect_space(src, &mut pos)?;
        }
    }

    // Everything before the checksum field participates in the sum; the
    // checksum's own hex digits do not.
    let sum = src[..pos].iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    let hi = hex_value(take(src, &mut pos)?)?;
    let lo = hex_value(take(src, &mut pos)?)?;
    let checksum = hi << 4 | lo;
    if sum.wrapping_add(checksum) != 0 {
        return Err(CodecError::Checksum {
            expected: sum.wrapping_neg(),
            got: checksum,
        });
    }

    match src.get(pos) {
        None | Some(&0) => {}
        Some(_) => return Err(CodecError::Separator { pos }),
    }

    Ok(Message {
        tag,
        subcode,
        payload,
        mode,
    })
}

fn take(src: &[u8], pos: &mut usize) -> Result<u8, CodecError> {
    let byte = *src.get(*pos).ok_or(CodecError::Truncated)?;
    *pos += 1;
    Ok(byte)
}

fn expect_space(src: &[u8], pos: &mut usize) -> Result<(), CodecError> {
    let byte = *src.get(*pos).ok_or(CodecError::Truncated)?;
    if byte != b' ' {
        return Err(CodecError::Separator { pos: *pos });
    }
    *pos += 1;
    Ok(())
}

fn hex_value(byte: u8) -> Result<u8, CodecError> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => Err(CodecError::HexDigit { got: byte }),
    }
}

fn put_hex(dst: &mut BytesMut, byte: u8) {
    dst.put_u8(HEX_DIGITS[usize::from(byte >> 4)]);
    dst.put_u8(HEX_DIGITS[usize::from(byte & 0x0F)]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(tag: [u8; 2], subcode: u8, payload: &[u8], mode: TransportMode) -> Vec<u8> {
        let mut dst = BytesMut::new();
        encode(tag, subcode, payload, mode, &mut dst).unwrap();
        dst.to_vec()
    }

    #[test]
    fn hex_encoding_matches_hand_computed_layout() {
        let wire = encoded(*b"RR", 1, &[0x01, 0xFF], TransportMode::Hex);
        assert_eq!(wire, b"RR 1 -2 01 FF 3F\0");
    }

    #[test]
    fn hex_round_trip_at_boundary_lengths() {
        for len in [0usize, 1, 127] {
            let payload: Vec<u8> = (0..len).map(|i| (i * 7) as u8).collect();
            let wire = encoded(*b"RR", 3, &payload, TransportMode::Hex);

            let message = decode(&wire).unwrap();
            assert_eq!(message.tag, *b"RR");
            assert_eq!(message.subcode, 3);
            assert_eq!(message.payload, payload);
            assert_eq!(message.mode, TransportMode::Hex);
        }
    }

    #[test]
    fn literal_round_trip_at_boundary_lengths() {
        for len in [0usize, 1, 127] {
            let payload: Vec<u8> = (0..len).map(|i| b'a' + (i % 26) as u8).collect();
            let wire = encoded(*b"CM", 0, &payload, TransportMode::Literal);

            let message = decode(&wire).unwrap();
            assert_eq!(message.tag, *b"CM");
            assert_eq!(message.subcode, 0);
            assert_eq!(message.payload, payload);
            assert_eq!(message.mode, TransportMode::Literal);
        }
    }

    #[test]
    fn literal_payload_may_contain_spaces_and_nuls() {
        let payload = b"a \0b";
        let wire = encoded(*b"CM", 7, payload, TransportMode::Literal);

        let message = decode(&wire).unwrap();
        assert_eq!(message.payload, payload);
    }

    #[test]
    fn every_single_bit_flip_is_rejected() {
        let wire = encoded(*b"RR", 1, &[0x01, 0xFF], TransportMode::Hex);
        let body_len = wire.len() - 1; // leave the NUL terminator alone

        for index in 0..body_len {
            for bit in 0..8 {
                let mut corrupt = wire.clone();
                corrupt[index] ^= 1 << bit;
                assert!(
                    decode(&corrupt).is_err(),
                    "flip of bit {bit} at byte {index} went undetected"
                );
            }
        }
    }

    #[test]
    fn decode_without_trailing_nul_is_accepted() {
        let mut wire = encoded(*b"RR", 1, &[0xAB], TransportMode::Hex);
        assert_eq!(wire.pop(), Some(0));
        assert!(decode(&wire).is_ok());
    }

    #[test]
    fn structural_failures_have_distinct_codes() {
        let cases: &[(&[u8], i32)] = &[
            (b"R", -16),                     // truncated inside the tag
            (b"RRZ1 -1 00 AA", -10),         // missing space after tag
            (b"RR A -1 00 AA", -12),         // subcode not a digit
            (b"RR 1 x1 00 AA", -13),         // length not decimal
            (b"RR 1 -12345 00 AA", -13),     // length too many digits
            (b"RR 1 -1 ZZ AA", -15),         // payload not hex
            (b"RR 1 -2 01 FF 00", -17),      // checksum does not balance
        ];

        for (input, code) in cases {
            let err = decode(input).unwrap_err();
            assert_eq!(err.code(), *code, "input {:?}", String::from_utf8_lossy(input));
        }
    }

    #[test]
    fn checksum_error_reports_both_sides() {
        let err = decode(b"RR 1 -2 01 FF 00").unwrap_err();
        assert!(matches!(
            err,
            CodecError::Checksum {
                expected: 0x3F,
                got: 0x00
            }
        ));
    }

    #[test]
    fn encode_validates_its_inputs() {
        let mut dst = BytesMut::new();

        let err = encode(*b" R", 1, &[], TransportMode::Hex, &mut dst).unwrap_err();
        assert!(matches!(err, CodecError::Tag { got: b' ' }));

        let err = encode(*b"RR", 10, &[], TransportMode::Hex, &mut dst).unwrap_err();
        assert!(matches!(err, CodecError::Subcode { got: 10 }));

        let oversized = vec![0u8; MAX_LENGTH + 1];
        let err = encode(*b"RR", 1, &oversized, TransportMode::Hex, &mut dst).unwrap_err();
        assert_eq!(err.code(), -14);
    }

    #[test]
    fn empty_hex_payload_keeps_mode_marker() {
        let wire = encoded(*b"RR", 9, &[], TransportMode::Hex);
        assert!(wire.starts_with(b"RR 9 -0 "));

        let message = decode(&wire).unwrap();
        assert_eq!(message.mode, TransportMode::Hex);
        assert!(message.payload.is_empty());
    }
}
