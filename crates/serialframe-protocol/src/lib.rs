//! Payload transforms applied before framing and after reassembly.
//!
//! An adapter is picked once per logical connection (see [`AdapterConfig`])
//! and then used for every message in both directions:
//! - [`PlainProtocol`] passes payloads through unchanged
//! - [`ShiftProtocol`] adds a fixed key to every payload byte, mod 256

pub mod adapter;
pub mod config;
pub mod error;
pub mod factory;
pub mod plain;
pub mod shift;

pub use adapter::{AdapterHandle, ProtocolAdapter};
pub use config::{AdapterConfig, DEFAULT_SHIFT_KEY};
pub use error::{ProtocolError, Result};
pub use factory::MessageFactory;
pub use plain::PlainProtocol;
pub use shift::ShiftProtocol;
