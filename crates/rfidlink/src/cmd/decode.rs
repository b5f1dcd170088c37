use std::fs;

use rfidlink_frame::codec;

use crate::cmd::DecodeArgs;
use crate::exit::{codec_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_message, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let source = resolve_source(&args)?;

    let message = codec::decode(&source).map_err(|err| codec_error("decode failed", err))?;
    print_message(&message, format);
    Ok(SUCCESS)
}

fn resolve_source(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(message) = &args.message {
        return Ok(message.clone().into_bytes());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "a message or --file is required"))
}
