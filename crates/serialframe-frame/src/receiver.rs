//! Incremental frame reassembly.
//!
//! Frames carry no delimiter and no checksum. The receiver relies entirely on
//! consuming exactly `1 + frame_len` bytes per frame, so a dropped or
//! duplicated byte on the link desynchronizes it until [`FrameReceiver::reset`]
//! is called or a later byte happens to line up as a valid length prefix.
//!
//! A receiver holds mutable state between calls and must be driven by a single
//! reader. Hand completed messages to other threads, not the receiver.

use bytes::{BufMut, BytesMut};

use crate::codec::{deserialize, FrameConfig, WireFormat, MAX_FRAME_LEN};
use crate::error::Result;
use crate::message::Message;

/// Reassembly state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Next byte is a length prefix.
    AwaitingLength,
    /// Length prefix read; collecting `expected` more bytes.
    Accumulating { expected: u8 },
}

/// Byte-at-a-time frame assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReceiver {
    state: State,
    // Holds the whole in-progress frame, length prefix included.
    buf: BytesMut,
    format: WireFormat,
}

impl FrameReceiver {
    /// Create an idle receiver for the given wire format.
    pub fn new(format: WireFormat) -> Self {
        Self {
            state: State::AwaitingLength,
            buf: BytesMut::with_capacity(1 + MAX_FRAME_LEN),
            format,
        }
    }

    /// Create an idle receiver from a connection config.
    pub fn with_config(config: FrameConfig) -> Self {
        Self::new(config.format)
    }

    /// Feed one byte.
    ///
    /// Returns `None` while the frame is incomplete. On the final byte of a
    /// frame the receiver resets itself and returns the decoded message, or
    /// the decode error if the frame was malformed.
    pub fn feed_byte(&mut self, byte: u8) -> Option<Result<Message>> {
        self.buf.put_u8(byte);

        match self.state {
            State::AwaitingLength => {
                self.state = State::Accumulating { expected: byte };
                None
            }
            State::Accumulating { expected } => {
                if self.buf.len() < 1 + expected as usize {
                    return None;
                }

                let result = deserialize(&self.buf, self.format);
                self.reset();
                match &result {
                    Ok(message) => tracing::trace!(
                        index = message.index,
                        payload_len = message.payload.len(),
                        "frame complete"
                    ),
                    Err(err) => tracing::warn!(error = %err, "dropping malformed frame"),
                }
                Some(result)
            }
        }
    }

    /// Feed a chunk of bytes, collecting every frame that completes in it.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Result<Message>> {
        bytes.iter().filter_map(|&b| self.feed_byte(b)).collect()
    }

    /// Drop any partial frame and wait for a new length prefix.
    ///
    /// Also the resynchronization hook for callers that detect a desync.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.state = State::AwaitingLength;
    }

    /// True when no partial frame is buffered.
    pub fn is_idle(&self) -> bool {
        self.state == State::AwaitingLength
    }

    /// Bytes of the in-progress frame received so far, length prefix included.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Length prefix of the in-progress frame, if one has been read.
    pub fn expected_len(&self) -> Option<usize> {
        match self.state {
            State::AwaitingLength => None,
            State::Accumulating { expected } => Some(expected as usize),
        }
    }

    /// Wire format this receiver decodes.
    pub fn format(&self) -> WireFormat {
        self.format
    }
}

impl Default for FrameReceiver {
    fn default() -> Self {
        Self::new(WireFormat::default())
    }
}
