use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use rfidlink_frame::{Message, TransportMode};
use serde::Serialize;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One poll-loop observation from `scan`: a completed frame or an error.
/// `result` carries the signed length code the dispatch loop would log.
#[derive(Serialize)]
pub struct ScanEvent {
    pub result: i32,
    pub detail: String,
    pub bytes: String,
}

#[derive(Serialize)]
struct WireOutput {
    len: usize,
    hex: String,
    text: String,
}

pub fn print_wire(wire: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = WireOutput {
                len: wire.len(),
                hex: hex_string(wire),
                text: text_preview(wire),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["LEN", "HEX", "TEXT"])
                .add_row(vec![
                    wire.len().to_string(),
                    hex_string(wire),
                    text_preview(wire),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("len={} hex={}", wire.len(), hex_string(wire));
        }
        OutputFormat::Raw => print_raw(wire),
    }
}

#[derive(Serialize)]
struct MessageOutput {
    tag: String,
    subcode: u8,
    mode: &'static str,
    len: usize,
    payload_hex: String,
    payload_text: String,
}

pub fn print_message(message: &Message, format: OutputFormat) {
    let out = MessageOutput {
        tag: String::from_utf8_lossy(&message.tag).into_owned(),
        subcode: message.subcode,
        mode: mode_name(message.mode),
        len: message.payload.len(),
        payload_hex: hex_string(&message.payload),
        payload_text: text_preview(&message.payload),
    };
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["TAG", "SUB", "MODE", "LEN", "PAYLOAD"])
                .add_row(vec![
                    out.tag,
                    out.subcode.to_string(),
                    out.mode.to_string(),
                    out.len.to_string(),
                    out.payload_hex,
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "tag={} subcode={} mode={} len={} payload={}",
                out.tag, out.subcode, out.mode, out.len, out.payload_hex
            );
        }
        OutputFormat::Raw => print_raw(&message.payload),
    }
}

pub fn print_scan_events(events: &[ScanEvent], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for event in events {
                println!(
                    "{}",
                    serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["RESULT", "DETAIL", "BYTES"]);
            for event in events {
                table.add_row(vec![
                    event.result.to_string(),
                    event.detail.clone(),
                    event.bytes.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for event in events {
                println!(
                    "result={} detail={} bytes={}",
                    event.result, event.detail, event.bytes
                );
            }
        }
        OutputFormat::Raw => {
            for event in events.iter().filter(|event| !event.bytes.is_empty()) {
                println!("{}", event.bytes);
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

pub fn hex_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn mode_name(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Hex => "hex",
        TransportMode::Literal => "literal",
    }
}

fn text_preview(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|&byte| std::ascii::escape_default(byte))
        .map(char::from)
        .collect()
}
