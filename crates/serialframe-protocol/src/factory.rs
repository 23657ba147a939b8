use std::sync::atomic::{AtomicU32, Ordering};

use bytes::Bytes;
use serialframe_frame::{Message, MessageType, WireFormat};

/// Builds outgoing messages with a per-connection running index.
///
/// The counter starts at zero and wraps at `u32::MAX`. In the index-only
/// format the type argument is dropped and messages are built untyped.
#[derive(Debug)]
pub struct MessageFactory {
    next_index: AtomicU32,
    format: WireFormat,
}

impl MessageFactory {
    pub fn new(format: WireFormat) -> Self {
        Self::starting_at(format, 0)
    }

    /// Start the counter at an explicit index.
    pub fn starting_at(format: WireFormat, index: u32) -> Self {
        Self {
            next_index: AtomicU32::new(index),
            format,
        }
    }

    /// Build a message with the next index.
    pub fn next(&self, message_type: MessageType, payload: impl Into<Bytes>) -> Message {
        let index = self.next_index.fetch_add(1, Ordering::Relaxed);
        match self.format {
            WireFormat::TypeTagged => Message::new(index, message_type, payload),
            WireFormat::IndexOnly => Message::untyped(index, payload),
        }
    }

    pub fn command(&self, text: &str) -> Message {
        self.next(MessageType::Command, text.as_bytes().to_vec())
    }

    pub fn response(&self, text: &str) -> Message {
        self.next(MessageType::Response, text.as_bytes().to_vec())
    }

    pub fn data(&self, payload: impl Into<Bytes>) -> Message {
        self.next(MessageType::Data, payload)
    }

    pub fn error(&self, text: &str) -> Message {
        self.next(MessageType::Error, text.as_bytes().to_vec())
    }

    pub fn heartbeat(&self) -> Message {
        self.next(MessageType::Heartbeat, Bytes::new())
    }

    /// Index the next message will get.
    pub fn peek_index(&self) -> u32 {
        self.next_index.load(Ordering::Relaxed)
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }
}

impl Default for MessageFactory {
    fn default() -> Self {
        Self::new(WireFormat::default())
    }
}
