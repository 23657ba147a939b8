//! Length-prefixed message framing for serial links.
//!
//! serialframe frames small typed messages for point-to-point byte streams
//! such as a UART, and reassembles them one byte at a time on the other end.
//!
//! # Crate Structure
//!
//! - [`frame`]: Message model, wire codec and the incremental receiver
//! - [`protocol`]: Payload adapters (plain, additive shift) and message factory
//! - [`link`]: Send/receive over a byte source and sink (behind `link` feature)

/// Re-export frame types.
pub mod frame {
    pub use serialframe_frame::*;
}

/// Re-export protocol adapter types.
pub mod protocol {
    pub use serialframe_protocol::*;
}

/// Re-export link types (requires `link` feature).
#[cfg(feature = "link")]
pub mod link {
    pub use serialframe_link::*;
}
