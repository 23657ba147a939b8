/// Errors that can occur in link operations.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] serialframe_frame::FrameError),

    /// Adapter-level error.
    #[error("protocol error: {0}")]
    Protocol(#[from] serialframe_protocol::ProtocolError),

    /// The byte source ended or the receiving side went away.
    #[error("link disconnected: {0}")]
    Disconnected(String),

    /// No message arrived in time.
    #[error("receive timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// An I/O error outside frame processing (for example, spawning the reader thread).
    #[error("link I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LinkError>;
