use std::io::{IsTerminal, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serialframe_frame::Message;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// How `encode` writes the frame bytes.
#[derive(Clone, Debug, Copy, Default, ValueEnum)]
pub enum FrameOutput {
    /// Space-separated uppercase hex on one line.
    #[default]
    Hex,
    /// Frame bytes as-is.
    Raw,
}

#[derive(Serialize)]
struct MessageOutput<'a> {
    index: u32,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    message_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    type_name: Option<&'a str>,
    payload_size: usize,
    payload: String,
    payload_hex: String,
    adapter: &'a str,
    timestamp: String,
}

pub fn print_message(message: &Message, adapter: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = MessageOutput {
                index: message.index,
                message_type: message.message_type.map(u8::from),
                type_name: message.message_type.map(|t| t.as_str()),
                payload_size: message.payload.len(),
                payload: payload_preview(&message.payload),
                payload_hex: format_hex(&message.payload),
                adapter,
                timestamp: now_unix_seconds(),
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
                .set_header(vec!["INDEX", "TYPE", "SIZE", "PAYLOAD"])
                .add_row(vec![
                    format!("0x{:08X}", message.index),
                    message
                        .message_type
                        .map_or_else(|| "-".to_string(), |t| t.to_string()),
                    message.payload.len().to_string(),
                    payload_preview(&message.payload),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{message}");
        }
        OutputFormat::Raw => {
            print_raw(&message.payload);
        }
    }
}

pub fn print_frame(frame: &[u8], format: FrameOutput) {
    match format {
        FrameOutput::Hex => println!("{}", format_hex(frame)),
        FrameOutput::Raw => print_raw(frame),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

pub fn format_hex(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
