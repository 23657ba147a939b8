use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use crate::codec::FrameConfig;
use crate::error::{FrameError, Result};
use crate::message::Message;
use crate::receiver::FrameReceiver;

const READ_CHUNK_SIZE: usize = 256;

/// Reads complete messages from any `Read` byte source.
///
/// Bytes are pushed through an owned [`FrameReceiver`]; callers always get
/// whole messages. A malformed frame is returned as an error and reading can
/// continue with the next call.
pub struct FrameReader<T> {
    inner: T,
    receiver: FrameReceiver,
    pending: VecDeque<Result<Message>>,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            receiver: FrameReceiver::with_config(config),
            pending: VecDeque::new(),
            config,
        }
    }

    /// Read the next complete message (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached.
    pub fn read_message(&mut self) -> Result<Message> {
        loop {
            if let Some(result) = self.pending.pop_front() {
                return result;
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                if !self.receiver.is_idle() {
                    tracing::debug!(
                        buffered = self.receiver.buffered(),
                        "byte source closed mid-frame"
                    );
                }
                return Err(FrameError::ConnectionClosed);
            }

            self.pending.extend(self.receiver.feed(&chunk[..read]));
        }
    }

    /// Discard any partial frame and queued messages.
    pub fn reset(&mut self) {
        self.receiver.reset();
        self.pending.clear();
    }

    /// The receiver driven by this reader.
    pub fn receiver(&self) -> &FrameReceiver {
        &self.receiver
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying source.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner source.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl<T: Read> Iterator for FrameReader<T> {
    type Item = Result<Message>;

    /// Yields messages and per-frame decode errors; stops at EOF or on an I/O error.
    fn next(&mut self) -> Option<Self::Item> {
        match self.read_message() {
            Err(FrameError::ConnectionClosed) => None,
            Err(FrameError::Io(err)) => {
                tracing::debug!(error = %err, "byte source failed");
                None
            }
            other => Some(other),
        }
    }
}
