use std::fs;

use rfidlink_frame::{command, ChannelConfig, FrameReader, Poll, TransportMode};
use rfidlink_port::{MemPort, SerialPort};

use crate::cmd::{parse_hex, KindArg, ScanArgs};
use crate::exit::{io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{hex_string, print_scan_events, OutputFormat, ScanEvent};

pub fn run(args: ScanArgs, format: OutputFormat) -> CliResult<i32> {
    let stream = resolve_stream(&args)?;

    let mut port = MemPort::new();
    port.feed(&stream);

    let config = ChannelConfig {
        id: args.id,
        capacity: args.capacity,
        mode: TransportMode::Hex,
    };
    let mut reader = match args.kind {
        KindArg::Binary => FrameReader::binary(port, config),
        KindArg::Line => FrameReader::line(port, config),
    };

    let mut events = Vec::new();
    while reader.port().available() {
        match reader.poll() {
            Ok(Poll::Pending) => {}
            Ok(Poll::Complete(len)) => {
                let frame = &reader.data()[..len];
                let detail = match args.kind {
                    KindArg::Binary if len > 4 => {
                        format!("{} frame", command::command_name(frame[3]))
                    }
                    KindArg::Binary => "frame".to_string(),
                    KindArg::Line => "line".to_string(),
                };
                events.push(ScanEvent {
                    result: len as i32,
                    detail,
                    bytes: hex_string(frame),
                });
            }
            Err(err) => events.push(ScanEvent {
                result: err.code(),
                detail: err.to_string(),
                bytes: String::new(),
            }),
        }
    }

    print_scan_events(&events, format);
    Ok(SUCCESS)
}

fn resolve_stream(args: &ScanArgs) -> CliResult<Vec<u8>> {
    if let Some(hex) = &args.hex {
        return parse_hex(hex);
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "a hex stream or --file is required"))
}
