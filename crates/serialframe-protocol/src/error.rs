/// Errors that can occur in protocol adapter operations.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Frame-level error (truncated frame, oversized payload).
    #[error("frame error: {0}")]
    Frame(#[from] serialframe_frame::FrameError),

    /// The adapter selection could not be parsed or is inconsistent.
    #[error("invalid adapter config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
