use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::codec::{serialize_into, FrameConfig, MAX_FRAME_LEN};
use crate::error::{FrameError, Result};
use crate::message::Message;

/// Writes complete frames to any `Write` byte sink.
///
/// Each frame goes out as one contiguous write sequence followed by a flush,
/// so frames never interleave on the sink.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Write> FrameWriter<T> {
    /// Create a new frame writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame writer with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(1 + MAX_FRAME_LEN),
            config,
        }
    }

    /// Serialize and write a message (blocking).
    ///
    /// Fails with [`FrameError::FormatMismatch`] before writing anything if the
    /// message format differs from the configured one.
    pub fn write_message(&mut self, message: &Message) -> Result<()> {
        self.config.check_outgoing(message)?;

        let mut buf = std::mem::take(&mut self.buf);
        buf.clear();
        let result = serialize_into(message, &mut buf).and_then(|()| self.write_frame_bytes(&buf));
        self.buf = buf;
        result
    }

    /// Write an already-encoded frame (for example, adapter output).
    pub fn write_frame_bytes(&mut self, frame: &[u8]) -> Result<()> {
        let mut offset = 0usize;
        while offset < frame.len() {
            match self.inner.write(&frame[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying sink.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum payload size for subsequent messages.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.config.max_payload_size = max_payload_size;
    }

    /// Current frame writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
