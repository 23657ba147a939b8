use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::adapter::AdapterHandle;
use crate::error::{ProtocolError, Result};
use crate::plain::PlainProtocol;
use crate::shift::ShiftProtocol;

/// Key used by `shift` when none is given.
pub const DEFAULT_SHIFT_KEY: u8 = 0x01;

/// Adapter selection for one logical connection.
///
/// Parses from `plain`, `shift`, `shift:7` or `shift:0x07`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AdapterConfig {
    #[default]
    Plain,
    Shift {
        key: u8,
    },
}

impl AdapterConfig {
    /// Instantiate the selected adapter.
    pub fn build(&self) -> AdapterHandle {
        tracing::debug!(adapter = %self, "selected payload adapter");
        match *self {
            AdapterConfig::Plain => Arc::new(PlainProtocol),
            AdapterConfig::Shift { key } => Arc::new(ShiftProtocol::new(key)),
        }
    }
}

impl fmt::Display for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterConfig::Plain => f.write_str("plain"),
            AdapterConfig::Shift { key } => write!(f, "shift:0x{key:02X}"),
        }
    }
}

impl FromStr for AdapterConfig {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (kind, key) = match s.split_once(':') {
            Some((kind, key)) => (kind, Some(key.trim())),
            None => (s, None),
        };

        match (kind.to_ascii_lowercase().as_str(), key) {
            ("plain", None) => Ok(AdapterConfig::Plain),
            ("plain", Some(_)) => Err(ProtocolError::InvalidConfig(
                "plain adapter takes no key".to_string(),
            )),
            ("shift", None) => Ok(AdapterConfig::Shift {
                key: DEFAULT_SHIFT_KEY,
            }),
            ("shift", Some(key)) => parse_key(key).map(|key| AdapterConfig::Shift { key }),
            (other, _) => Err(ProtocolError::InvalidConfig(format!(
                "unknown adapter: {other}"
            ))),
        }
    }
}

fn parse_key(input: &str) -> Result<u8> {
    let parsed = match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => input.parse::<u8>(),
    };
    parsed.map_err(|_| ProtocolError::InvalidConfig(format!("invalid shift key: {input}")))
}
