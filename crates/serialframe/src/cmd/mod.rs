use clap::{Args, Subcommand};
use std::path::PathBuf;

use serialframe_frame::{FrameConfig, MessageType, WireFormat};
use serialframe_protocol::AdapterConfig;

use crate::exit::{CliError, CliResult};
use crate::output::{FrameOutput, OutputFormat};

pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build one frame and print its bytes.
    Encode(EncodeArgs),
    /// Reassemble frames from a byte stream and print the messages.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Settings shared by both directions of a connection.
#[derive(Args, Debug, Clone)]
pub struct WireArgs {
    /// Payload adapter: plain, shift, shift:<key>.
    #[arg(long, short = 'p', default_value = "plain", value_parser = parse_adapter)]
    pub protocol: AdapterConfig,
    /// Use the index-only format (no type byte).
    #[arg(long)]
    pub index_only: bool,
}

impl WireArgs {
    pub fn frame_config(&self) -> FrameConfig {
        if self.index_only {
            FrameConfig::for_format(WireFormat::IndexOnly)
        } else {
            FrameConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Message index (decimal or 0x-prefixed hex).
    #[arg(long, short = 'i', default_value = "0", value_parser = parse_index)]
    pub index: u32,
    /// Message type name or number. Ignored with --index-only.
    #[arg(long = "type", short = 't', default_value = "command", value_parser = parse_type)]
    pub message_type: MessageType,
    /// Text payload.
    #[arg(long, conflicts_with_all = ["hex", "file"])]
    pub data: Option<String>,
    /// Hex payload (e.g. "01 02 FF" or "01,02,FF").
    #[arg(long, conflicts_with_all = ["data", "file"])]
    pub hex: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with_all = ["data", "hex"])]
    pub file: Option<PathBuf>,
    /// How to print the encoded frame.
    #[arg(long, short = 'o', value_enum, default_value_t = FrameOutput::Hex)]
    pub output: FrameOutput,
    #[command(flatten)]
    pub wire: WireArgs,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Byte stream to read. Default: stdin.
    pub path: Option<PathBuf>,
    /// Input is hex text rather than raw bytes.
    #[arg(long)]
    pub hex: bool,
    /// Exit after printing N messages.
    #[arg(long)]
    pub count: Option<usize>,
    #[command(flatten)]
    pub wire: WireArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

fn parse_adapter(input: &str) -> Result<AdapterConfig, String> {
    input.parse().map_err(|err| format!("{err}"))
}

fn parse_type(input: &str) -> Result<MessageType, String> {
    input.parse().map_err(|err| format!("{err}"))
}

pub fn parse_index(input: &str) -> Result<u32, String> {
    let input = input.trim();
    let parsed = match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => input.parse::<u32>(),
    };
    parsed.map_err(|_| format!("invalid index: {input}"))
}

/// Parse hex bytes separated by whitespace, commas or nothing.
pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let mut bytes = Vec::new();
    for token in input.split(|c: char| c.is_whitespace() || c == ',') {
        let token = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        if token.is_empty() {
            continue;
        }
        if token.len() % 2 != 0 {
            return Err(CliError::usage(format!("odd-length hex token: {token}")));
        }
        for pair in token.as_bytes().chunks(2) {
            let pair = std::str::from_utf8(pair)
                .map_err(|_| CliError::usage(format!("invalid hex: {token}")))?;
            let byte = u8::from_str_radix(pair, 16)
                .map_err(|_| CliError::usage(format!("invalid hex byte: {pair}")))?;
            bytes.push(byte);
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_accepts_hex_and_decimal() {
        assert_eq!(parse_index("0x12345678").unwrap(), 0x12345678);
        assert_eq!(parse_index("66").unwrap(), 66);
        assert!(parse_index("0x1_0000_0000").is_err());
        assert!(parse_index("-1").is_err());
    }

    #[test]
    fn hex_separators() {
        assert_eq!(parse_hex("01 02 FF").unwrap(), vec![0x01, 0x02, 0xFF]);
        assert_eq!(parse_hex("01,02,ff").unwrap(), vec![0x01, 0x02, 0xFF]);
        assert_eq!(parse_hex("0A0112\n3456").unwrap(), vec![0x0A, 0x01, 0x12, 0x34, 0x56]);
        assert_eq!(parse_hex("0x41 0x42").unwrap(), b"AB".to_vec());
        assert!(parse_hex("ABC").is_err());
        assert!(parse_hex("0x0x41").is_err());
        assert!(parse_hex("ZZ").is_err());
        assert!(parse_hex("").unwrap().is_empty());
    }

    #[test]
    fn wire_args_pick_format() {
        let args = WireArgs {
            protocol: AdapterConfig::Plain,
            index_only: true,
        };
        assert_eq!(args.frame_config().format, WireFormat::IndexOnly);
    }
}
