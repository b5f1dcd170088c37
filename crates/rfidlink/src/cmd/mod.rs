use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use rfidlink_frame::{TransportMode, DEFAULT_CAPACITY};

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod frame;
pub mod scan;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode an ASCII transport message.
    Encode(EncodeArgs),
    /// Decode an ASCII transport message.
    Decode(DecodeArgs),
    /// Scan a byte stream for frames, one poll per byte.
    Scan(ScanArgs),
    /// Build a binary command frame for a reader module.
    Frame(FrameArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Scan(args) => scan::run(args, format),
        Command::Frame(args) => frame::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    Hex,
    Literal,
}

impl From<ModeArg> for TransportMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Hex => TransportMode::Hex,
            ModeArg::Literal => TransportMode::Literal,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    Binary,
    Line,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Two-character device tag.
    pub tag: String,
    /// Subcode digit.
    #[arg(value_parser = clap::value_parser!(u8).range(0..=9))]
    pub subcode: u8,
    /// Payload as space-separated hex pairs.
    #[arg(long, conflicts_with = "text")]
    pub hex: Option<String>,
    /// Payload as a literal string.
    #[arg(long)]
    pub text: Option<String>,
    /// Payload rendering on the wire.
    #[arg(long, value_enum, default_value = "hex")]
    pub mode: ModeArg,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// The message text, trailing NUL omitted.
    #[arg(conflicts_with = "file", required_unless_present = "file")]
    pub message: Option<String>,
    /// Read the message bytes from a file instead.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Byte stream as space-separated hex pairs.
    #[arg(conflicts_with = "file", required_unless_present = "file")]
    pub hex: Option<String>,
    /// Read the raw byte stream from a file instead.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Framing to scan with.
    #[arg(long, value_enum, default_value = "binary")]
    pub kind: KindArg,
    /// Channel buffer capacity in bytes.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,
    /// Channel identity to report in logs.
    #[arg(long, default_value_t = 0)]
    pub id: u8,
}

#[derive(Args, Debug)]
pub struct FrameArgs {
    /// Command name (e.g. `seek`) or byte value (e.g. `0x82`).
    pub cmd: String,
    /// Data bytes as space-separated hex pairs.
    #[arg(long)]
    pub data: Option<String>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse space-separated hex byte pairs, `01 FF` style.
pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    input
        .split_whitespace()
        .map(|pair| {
            u8::from_str_radix(pair, 16)
                .map_err(|_| CliError::new(USAGE, format!("invalid hex byte: {pair}")))
        })
        .collect()
}
