use std::sync::Arc;

use bytes::Bytes;
use serialframe_frame::{deserialize, serialize, Message, WireFormat};

use crate::error::Result;

/// A reversible payload transform applied around framing.
///
/// Implementors only provide the payload transform pair. Header fields
/// (length, type, index) are never touched. Adapters hold no per-call state
/// and may be shared freely between threads.
pub trait ProtocolAdapter: Send + Sync {
    /// Short name used in logs and CLI output.
    fn name(&self) -> &'static str;

    /// Transform an outgoing payload.
    fn encode_payload(&self, payload: &Bytes) -> Bytes;

    /// Reverse [`encode_payload`](Self::encode_payload).
    fn decode_payload(&self, payload: &Bytes) -> Bytes;

    /// Transform the payload and serialize the message into one frame.
    fn encode(&self, message: &Message) -> Result<Bytes> {
        let transformed = message.with_payload(self.encode_payload(&message.payload));
        Ok(serialize(&transformed)?)
    }

    /// Deserialize one complete frame and reverse the payload transform.
    fn decode(&self, frame: &[u8], format: WireFormat) -> Result<Message> {
        let message = deserialize(frame, format)?;
        Ok(self.open(message))
    }

    /// Reverse the payload transform on a message assembled by a receiver.
    fn open(&self, message: Message) -> Message {
        let payload = self.decode_payload(&message.payload);
        message.with_payload(payload)
    }
}

impl<A: ProtocolAdapter + ?Sized> ProtocolAdapter for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn encode_payload(&self, payload: &Bytes) -> Bytes {
        (**self).encode_payload(payload)
    }

    fn decode_payload(&self, payload: &Bytes) -> Bytes {
        (**self).decode_payload(payload)
    }
}

impl<A: ProtocolAdapter + ?Sized> ProtocolAdapter for Arc<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn encode_payload(&self, payload: &Bytes) -> Bytes {
        (**self).encode_payload(payload)
    }

    fn decode_payload(&self, payload: &Bytes) -> Bytes {
        (**self).decode_payload(payload)
    }
}

/// Shared, dynamically chosen adapter.
pub type AdapterHandle = Arc<dyn ProtocolAdapter>;
