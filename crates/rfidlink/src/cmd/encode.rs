use bytes::BytesMut;
use rfidlink_frame::codec;

use crate::cmd::{parse_hex, EncodeArgs};
use crate::exit::{codec_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_wire, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let tag: [u8; 2] = args
        .tag
        .as_bytes()
        .try_into()
        .map_err(|_| CliError::new(USAGE, "device tag must be exactly two characters"))?;
    let payload = resolve_payload(&args)?;

    let mut wire = BytesMut::new();
    codec::encode(tag, args.subcode, &payload, args.mode.into(), &mut wire)
        .map_err(|err| codec_error("encode failed", err))?;

    print_wire(&wire, format);
    Ok(SUCCESS)
}

fn resolve_payload(args: &EncodeArgs) -> CliResult<Vec<u8>> {
    if let Some(hex) = &args.hex {
        return parse_hex(hex);
    }
    if let Some(text) = &args.text {
        return Ok(text.as_bytes().to_vec());
    }
    Ok(Vec::new())
}
