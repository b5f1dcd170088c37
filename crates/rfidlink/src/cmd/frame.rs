use bytes::BytesMut;
use rfidlink_frame::{command, encode_command};

use crate::cmd::{parse_hex, FrameArgs};
use crate::exit::{frame_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_wire, OutputFormat};

pub fn run(args: FrameArgs, format: OutputFormat) -> CliResult<i32> {
    let cmd = resolve_command(&args.cmd)?;
    let data = match &args.data {
        Some(hex) => parse_hex(hex)?,
        None => Vec::new(),
    };

    let mut wire = BytesMut::new();
    encode_command(cmd, &data, &mut wire).map_err(|err| frame_error("framing failed", err))?;

    print_wire(&wire, format);
    Ok(SUCCESS)
}

fn resolve_command(input: &str) -> CliResult<u8> {
    if let Some(byte) = command::command_byte(input) {
        return Ok(byte);
    }
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    u8::from_str_radix(digits, 16)
        .map_err(|_| CliError::new(USAGE, format!("unknown command: {input}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_and_hex_bytes() {
        assert_eq!(resolve_command("seek").unwrap(), command::SEEK_FOR_TAG);
        assert_eq!(resolve_command("FIRMWARE").unwrap(), command::FIRMWARE);
        assert_eq!(resolve_command("0x82").unwrap(), 0x82);
        assert_eq!(resolve_command("9A").unwrap(), 0x9A);
    }

    #[test]
    fn rejects_unknown_commands() {
        let err = resolve_command("warp-drive").unwrap_err();
        assert_eq!(err.code, USAGE);
    }
}
