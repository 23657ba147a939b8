use crate::codec::WireFormat;

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Fewer bytes were supplied than the frame header requires.
    #[error("truncated frame ({len} bytes, need at least {min})")]
    TruncatedFrame { len: usize, min: usize },

    /// The payload does not fit the 1-byte length prefix.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// A type byte outside the known set was rejected by a strict conversion.
    #[error("unrecognized message type 0x{0:02X}")]
    UnrecognizedType(u8),

    /// The message does not match the wire format configured for this connection.
    #[error("message uses {actual:?} format but connection is configured for {expected:?}")]
    FormatMismatch {
        expected: WireFormat,
        actual: WireFormat,
    },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte source ended before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
