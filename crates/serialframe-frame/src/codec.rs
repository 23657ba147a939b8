use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};
use crate::message::Message;
use crate::message_type::MessageType;

/// Largest value the 1-byte length prefix can carry.
pub const MAX_FRAME_LEN: usize = u8::MAX as usize;

/// Maximum payload size for the type-tagged format: 255 - 5 = 250 bytes.
pub const MAX_PAYLOAD: usize = MAX_FRAME_LEN - WireFormat::TypeTagged.header_size();

/// Header layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WireFormat {
    /// `[len][type][index: 4B BE][payload]`
    #[default]
    TypeTagged,
    /// `[len][index: 4B BE][payload]`
    IndexOnly,
}

impl WireFormat {
    /// Header bytes counted by the length prefix (type + index, or index only).
    pub const fn header_size(self) -> usize {
        match self {
            WireFormat::TypeTagged => 5,
            WireFormat::IndexOnly => 4,
        }
    }

    /// Smallest complete frame, length prefix included.
    pub const fn min_frame_size(self) -> usize {
        1 + self.header_size()
    }

    /// Largest payload that still fits the length prefix.
    pub const fn max_payload(self) -> usize {
        MAX_FRAME_LEN - self.header_size()
    }
}

/// Encode a message into a new buffer.
///
/// Wire format (type-tagged):
/// ```text
/// ┌──────────┬──────────┬──────────────┬──────────────────────┐
/// │ Length   │ Type     │ Index        │ Payload              │
/// │ (1B)     │ (1B)     │ (4B BE)      │ (Length - 5 bytes)   │
/// └──────────┴──────────┴──────────────┴──────────────────────┘
/// ```
/// The index-only format drops the type byte and the header shrinks to 4.
pub fn serialize(message: &Message) -> Result<Bytes> {
    let mut dst = BytesMut::with_capacity(message.wire_size());
    serialize_into(message, &mut dst)?;
    Ok(dst.freeze())
}

/// Encode a message, appending to `dst`.
pub fn serialize_into(message: &Message, dst: &mut BytesMut) -> Result<()> {
    let format = message.format();
    if message.payload.len() > format.max_payload() {
        return Err(FrameError::PayloadTooLarge {
            size: message.payload.len(),
            max: format.max_payload(),
        });
    }

    dst.reserve(message.wire_size());
    dst.put_u8(message.frame_len() as u8);
    if let Some(message_type) = message.message_type {
        dst.put_u8(message_type.as_u8());
    }
    dst.put_u32(message.index);
    dst.put_slice(&message.payload);
    Ok(())
}

/// Decode exactly one complete frame.
///
/// Only the minimum size is checked; the caller is responsible for passing
/// exactly `1 + frame_len` bytes. Unknown type bytes become
/// [`MessageType::Undefined`].
pub fn deserialize(bytes: &[u8], format: WireFormat) -> Result<Message> {
    let min = format.min_frame_size();
    if bytes.len() < min {
        return Err(FrameError::TruncatedFrame {
            len: bytes.len(),
            min,
        });
    }

    let mut offset = 1;
    let message_type = match format {
        WireFormat::TypeTagged => {
            let raw = bytes[offset];
            offset += 1;
            let tag = MessageType::from_u8(raw);
            if !tag.is_known() {
                tracing::debug!(raw, "unrecognized message type, keeping as UNDEFINED");
            }
            Some(tag)
        }
        WireFormat::IndexOnly => None,
    };

    let index = u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ]);
    offset += 4;

    Ok(Message {
        index,
        message_type,
        payload: Bytes::copy_from_slice(&bytes[offset..]),
    })
}

/// Configuration for framing on one logical connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Header layout used on this connection.
    pub format: WireFormat,
    /// Maximum payload size in bytes. Clamped to what the length prefix allows.
    pub max_payload_size: usize,
}

impl FrameConfig {
    /// Default configuration for a given format.
    pub fn for_format(format: WireFormat) -> Self {
        Self {
            format,
            max_payload_size: format.max_payload(),
        }
    }

    /// Effective payload limit.
    pub fn payload_limit(&self) -> usize {
        self.max_payload_size.min(self.format.max_payload())
    }

    /// Reject a message this connection cannot carry: wrong wire format, or
    /// a payload over [`payload_limit`](Self::payload_limit).
    pub fn check_outgoing(&self, message: &Message) -> Result<()> {
        self.check_format(message)?;
        let limit = self.payload_limit();
        if message.payload.len() > limit {
            return Err(FrameError::PayloadTooLarge {
                size: message.payload.len(),
                max: limit,
            });
        }
        Ok(())
    }

    /// Reject a message whose wire format differs from this connection's.
    pub fn check_format(&self, message: &Message) -> Result<()> {
        if message.format() != self.format {
            return Err(FrameError::FormatMismatch {
                expected: self.format,
                actual: message.format(),
            });
        }
        Ok(())
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            format: WireFormat::TypeTagged,
            max_payload_size: MAX_PAYLOAD,
        }
    }
}
