//! Connection-level messaging over a byte source and a byte sink.
//!
//! [`Link`] pairs a reader and a writer with one adapter. For setups where a
//! dedicated thread reads the link, [`spawn_receiver`] keeps the frame
//! receiver on that thread and hands completed messages over a channel.

#[cfg(feature = "async")]
pub mod async_codec;
pub mod error;
pub mod handoff;
pub mod link;

#[cfg(feature = "async")]
pub use async_codec::AdapterCodec;
pub use error::{LinkError, Result};
pub use handoff::{spawn_receiver, ReceiverHandle};
pub use link::Link;
