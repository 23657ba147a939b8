//! Length-prefixed message framing for serial links.
//!
//! Every message is framed as:
//! - A 1-byte frame length (header + payload, excluding itself)
//! - An optional 1-byte message type tag
//! - A 4-byte big-endian message index
//! - Up to 250 payload bytes
//!
//! There is no delimiter and no checksum. [`FrameReceiver`] reassembles
//! frames one byte at a time from an unreliable stream.

#[cfg(feature = "async")]
pub mod async_codec;
pub mod codec;
pub mod error;
pub mod message;
pub mod message_type;
pub mod reader;
pub mod receiver;
pub mod writer;

#[cfg(feature = "async")]
pub use async_codec::MessageCodec;
pub use codec::{
    deserialize, serialize, serialize_into, FrameConfig, WireFormat, MAX_FRAME_LEN, MAX_PAYLOAD,
};
pub use error::{FrameError, Result};
pub use message::Message;
pub use message_type::MessageType;
pub use reader::FrameReader;
pub use receiver::FrameReceiver;
pub use writer::FrameWriter;
