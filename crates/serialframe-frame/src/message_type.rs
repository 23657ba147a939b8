//! Message type tags.
//!
//! Tags 0x00-0x05 are defined by the protocol. Every other byte value is
//! carried as [`MessageType::Undefined`] so that frames from a newer peer
//! still parse.

use std::fmt;
use std::str::FromStr;

use crate::error::{FrameError, Result};

/// The type tag carried in byte 1 of a type-tagged frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// No particular meaning.
    None,
    /// Request for the remote side to act.
    Command,
    /// Answer to a previous command.
    Response,
    /// Bulk or sensor data.
    Data,
    /// Liveness signal, usually without payload.
    Heartbeat,
    /// Error notification.
    Error,
    /// Any tag outside the known set. Holds the raw byte seen on the wire.
    Undefined(u8),
}

impl MessageType {
    /// The canonical undefined sentinel (0xFF).
    pub const UNDEFINED: MessageType = MessageType::Undefined(0xFF);

    /// All known tags, in wire order.
    pub const KNOWN: [MessageType; 6] = [
        MessageType::None,
        MessageType::Command,
        MessageType::Response,
        MessageType::Data,
        MessageType::Heartbeat,
        MessageType::Error,
    ];

    /// Map a raw byte to a tag. Never fails: unknown values become `Undefined`.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0x00 => MessageType::None,
            0x01 => MessageType::Command,
            0x02 => MessageType::Response,
            0x03 => MessageType::Data,
            0x04 => MessageType::Heartbeat,
            0x05 => MessageType::Error,
            other => MessageType::Undefined(other),
        }
    }

    /// Strict conversion for user-supplied values.
    ///
    /// Accepts the known tags and the 0xFF sentinel; anything else is
    /// [`FrameError::UnrecognizedType`].
    pub fn try_from_known(value: u8) -> Result<Self> {
        match Self::from_u8(value) {
            MessageType::Undefined(0xFF) => Ok(Self::UNDEFINED),
            MessageType::Undefined(raw) => Err(FrameError::UnrecognizedType(raw)),
            known => Ok(known),
        }
    }

    /// Raw wire value.
    pub const fn as_u8(self) -> u8 {
        match self {
            MessageType::None => 0x00,
            MessageType::Command => 0x01,
            MessageType::Response => 0x02,
            MessageType::Data => 0x03,
            MessageType::Heartbeat => 0x04,
            MessageType::Error => 0x05,
            MessageType::Undefined(raw) => raw,
        }
    }

    /// Returns true for the six protocol-defined tags.
    pub const fn is_known(self) -> bool {
        !matches!(self, MessageType::Undefined(_))
    }

    /// Human-readable name.
    pub const fn as_str(self) -> &'static str {
        match self {
            MessageType::None => "NONE",
            MessageType::Command => "COMMAND",
            MessageType::Response => "RESPONSE",
            MessageType::Data => "DATA",
            MessageType::Heartbeat => "HEARTBEAT",
            MessageType::Error => "ERROR",
            MessageType::Undefined(_) => "UNDEFINED",
        }
    }
}

impl From<u8> for MessageType {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

impl From<MessageType> for u8 {
    fn from(value: MessageType) -> Self {
        value.as_u8()
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = FrameError;

    /// Parse a tag name (case-insensitive) or a number (`3`, `0x03`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let by_name = match s.to_ascii_uppercase().as_str() {
            "NONE" => Some(MessageType::None),
            "COMMAND" | "TEXT" => Some(MessageType::Command),
            "RESPONSE" => Some(MessageType::Response),
            "DATA" => Some(MessageType::Data),
            "HEARTBEAT" => Some(MessageType::Heartbeat),
            "ERROR" => Some(MessageType::Error),
            "UNDEFINED" => Some(MessageType::UNDEFINED),
            _ => None,
        };
        if let Some(tag) = by_name {
            return Ok(tag);
        }

        let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u8::from_str_radix(hex, 16),
            None => s.parse::<u8>(),
        };
        match value {
            Ok(value) => Self::try_from_known(value),
            Err(_) => Err(FrameError::UnrecognizedType(MessageType::UNDEFINED.as_u8())),
        }
    }
}
