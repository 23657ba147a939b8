use std::fmt;

use bytes::Bytes;

use crate::codec::WireFormat;
use crate::message_type::MessageType;

/// A single protocol message.
///
/// Immutable once built: payload transforms go through [`Message::with_payload`],
/// which returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Caller-assigned identifier. The protocol imposes no ordering on it.
    pub index: u32,
    /// Type tag. `None` means the message travels in the index-only format.
    pub message_type: Option<MessageType>,
    /// Opaque payload bytes.
    pub payload: Bytes,
}

impl Message {
    /// Create a type-tagged message.
    pub fn new(index: u32, message_type: MessageType, payload: impl Into<Bytes>) -> Self {
        Self {
            index,
            message_type: Some(message_type),
            payload: payload.into(),
        }
    }

    /// Create a message for the index-only wire format.
    pub fn untyped(index: u32, payload: impl Into<Bytes>) -> Self {
        Self {
            index,
            message_type: None,
            payload: payload.into(),
        }
    }

    /// Same header, different payload.
    pub fn with_payload(&self, payload: impl Into<Bytes>) -> Self {
        Self {
            index: self.index,
            message_type: self.message_type,
            payload: payload.into(),
        }
    }

    /// The wire format this message serializes to.
    pub fn format(&self) -> WireFormat {
        match self.message_type {
            Some(_) => WireFormat::TypeTagged,
            None => WireFormat::IndexOnly,
        }
    }

    /// Value of the length-prefix byte (header + payload, excluding the prefix itself).
    pub fn frame_len(&self) -> usize {
        self.format().header_size() + self.payload.len()
    }

    /// Total bytes on the wire, including the length prefix.
    pub fn wire_size(&self) -> usize {
        1 + self.frame_len()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message(idx=0x{:08X}, ", self.index)?;
        if let Some(message_type) = self.message_type {
            write!(f, "type={message_type}, ")?;
        }
        f.write_str("data=[")?;
        for (i, byte) in self.payload.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02X}")?;
        }
        f.write_str("] '")?;
        for &byte in self.payload.iter() {
            let ch = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '.'
            };
            write!(f, "{ch}")?;
        }
        f.write_str("')")
    }
}
