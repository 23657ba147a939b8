use std::io::Read;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;

use serialframe_frame::{FrameConfig, FrameError, FrameReader, Message};
use serialframe_protocol::{AdapterHandle, ProtocolAdapter};

use crate::error::{LinkError, Result};

/// Handle to a reader thread started by [`spawn_receiver`].
///
/// Only completed messages cross the thread boundary; the receiver state
/// stays inside the reader thread.
pub struct ReceiverHandle {
    rx: Receiver<Result<Message>>,
    thread: JoinHandle<Result<()>>,
}

/// Spawn a thread that owns `source` and the frame receiver for it.
///
/// Each completed frame is passed through `adapter` and sent to the returned
/// handle. Malformed frames are forwarded as errors and reading continues.
/// The thread ends at EOF, on an I/O error, or once the handle is dropped
/// and the next message cannot be delivered.
pub fn spawn_receiver<R>(
    source: R,
    config: FrameConfig,
    adapter: AdapterHandle,
) -> Result<ReceiverHandle>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<Result<Message>>();
    let thread = std::thread::Builder::new()
        .name("serialframe-rx".to_string())
        .spawn(move || -> Result<()> {
            let mut reader = FrameReader::with_config(source, config);
            loop {
                let item = match reader.read_message() {
                    Ok(message) => Ok(adapter.open(message)),
                    Err(FrameError::ConnectionClosed) => {
                        tracing::debug!("byte source closed, receiver thread exiting");
                        return Ok(());
                    }
                    Err(FrameError::Io(err)) => {
                        tracing::debug!(error = %err, "byte source failed, receiver thread exiting");
                        return Err(FrameError::Io(err).into());
                    }
                    Err(err) => Err(err.into()),
                };

                if tx.send(item).is_err() {
                    tracing::debug!("receiver handle dropped, receiver thread exiting");
                    return Ok(());
                }
            }
        })?;

    Ok(ReceiverHandle { rx, thread })
}

impl ReceiverHandle {
    /// Block until the next message (or per-frame error) arrives.
    pub fn recv(&self) -> Result<Message> {
        self.rx
            .recv()
            .map_err(|_| LinkError::Disconnected("receiver thread ended".to_string()))?
    }

    /// Like [`recv`](Self::recv) with an upper bound on the wait.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Message> {
        match self.rx.recv_timeout(timeout) {
            Ok(item) => item,
            Err(RecvTimeoutError::Timeout) => Err(LinkError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                Err(LinkError::Disconnected("receiver thread ended".to_string()))
            }
        }
    }

    /// Non-blocking poll. `Ok(None)` when nothing is queued yet.
    pub fn try_recv(&self) -> Result<Option<Message>> {
        match self.rx.try_recv() {
            Ok(item) => item.map(Some),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                Err(LinkError::Disconnected("receiver thread ended".to_string()))
            }
        }
    }

    /// Iterate until the reader thread ends.
    pub fn iter(&self) -> impl Iterator<Item = Result<Message>> + '_ {
        self.rx.iter()
    }

    /// Returns true once the reader thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the reader thread and return how it ended.
    ///
    /// Blocks until the byte source reaches EOF or fails.
    pub fn join(self) -> Result<()> {
        drop(self.rx);
        self.thread
            .join()
            .map_err(|_| LinkError::Disconnected("receiver thread panicked".to_string()))?
    }
}
