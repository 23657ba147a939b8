use std::io::{Read, Write};

use serialframe_frame::{FrameConfig, FrameError, FrameReader, FrameWriter, Message};
use serialframe_protocol::{AdapterHandle, ProtocolAdapter};

use crate::error::{LinkError, Result};

/// One logical connection: a byte source, a byte sink and the adapter both use.
///
/// The link owns its receiver state. Use [`crate::spawn_receiver`] when reads
/// have to happen on a different thread than message processing.
pub struct Link<R, W> {
    reader: FrameReader<R>,
    writer: FrameWriter<W>,
    adapter: AdapterHandle,
    config: FrameConfig,
}

impl<R: Read, W: Write> Link<R, W> {
    /// Build a link from separate read and write halves.
    pub fn new(source: R, sink: W, adapter: AdapterHandle, config: FrameConfig) -> Self {
        Self {
            reader: FrameReader::with_config(source, config),
            writer: FrameWriter::with_config(sink, config),
            adapter,
            config,
        }
    }

    /// Encode through the adapter and write one contiguous frame.
    pub fn send(&mut self, message: &Message) -> Result<()> {
        self.config.check_outgoing(message)?;

        let frame = self.adapter.encode(message)?;
        self.writer.write_frame_bytes(&frame)?;
        tracing::debug!(
            index = message.index,
            adapter = self.adapter.name(),
            bytes = frame.len(),
            "sent frame"
        );
        Ok(())
    }

    /// Receive the next message with the adapter transform reversed.
    ///
    /// A malformed frame is returned as an error; the link stays usable.
    pub fn recv(&mut self) -> Result<Message> {
        match self.reader.read_message() {
            Ok(message) => Ok(self.adapter.open(message)),
            Err(FrameError::ConnectionClosed) => {
                Err(LinkError::Disconnected("byte source closed".to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Drop any partially received frame and wait for a fresh length prefix.
    pub fn resync(&mut self) {
        tracing::debug!(
            buffered = self.reader.receiver().buffered(),
            "resynchronizing receiver"
        );
        self.reader.reset();
    }

    pub fn adapter(&self) -> &AdapterHandle {
        &self.adapter
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Split back into source and sink.
    pub fn into_parts(self) -> (R, W) {
        (self.reader.into_inner(), self.writer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use serialframe_frame::{MessageType, WireFormat};
    use serialframe_protocol::AdapterConfig;

    use super::*;

    fn pipe_roundtrip(adapter: AdapterConfig, msgs: &[Message]) -> Vec<Message> {
        let mut tx = Link::new(
            Cursor::new(Vec::<u8>::new()),
            Vec::<u8>::new(),
            adapter.build(),
            FrameConfig::default(),
        );
        for msg in msgs {
            tx.send(msg).unwrap();
        }
        let (_, wire) = tx.into_parts();

        let mut rx = Link::new(
            Cursor::new(wire),
            std::io::sink(),
            adapter.build(),
            FrameConfig::default(),
        );
        let mut out = Vec::new();
        loop {
            match rx.recv() {
                Ok(msg) => out.push(msg),
                Err(LinkError::Disconnected(_)) => break,
                Err(err) => panic!("unexpected error: {err}"),
            }
        }
        out
    }

    #[test]
    fn plain_roundtrip() {
        let msgs = vec![
            Message::new(0x12345678, MessageType::Command, &b"Hello"[..]),
            Message::new(0xABCDEF01, MessageType::Command, &b"World!"[..]),
            Message::new(0x42, MessageType::Data, vec![0x01u8, 0x02, 0x03, 0xFF]),
        ];
        assert_eq!(pipe_roundtrip(AdapterConfig::Plain, &msgs), msgs);
    }

    #[test]
    fn shift_roundtrip() {
        let msgs = vec![
            Message::new(1, MessageType::Response, &b"shifted"[..]),
            Message::new(2, MessageType::Heartbeat, &b""[..]),
        ];
        assert_eq!(
            pipe_roundtrip(AdapterConfig::Shift { key: 0xFE }, &msgs),
            msgs
        );
    }

    #[test]
    fn shift_changes_bytes_on_wire() {
        let mut tx = Link::new(
            Cursor::new(Vec::<u8>::new()),
            Vec::<u8>::new(),
            AdapterConfig::Shift { key: 1 }.build(),
            FrameConfig::default(),
        );
        tx.send(&Message::new(0x12345678, MessageType::Command, &b"Hello"[..]))
            .unwrap();
        let (_, wire) = tx.into_parts();
        assert_eq!(
            wire,
            [0x0A, 0x01, 0x12, 0x34, 0x56, 0x78, 0x49, 0x66, 0x6D, 0x6D, 0x70]
        );
    }

    #[test]
    fn rejects_format_mismatch() {
        let mut link = Link::new(
            Cursor::new(Vec::<u8>::new()),
            Vec::<u8>::new(),
            AdapterConfig::Plain.build(),
            FrameConfig::for_format(WireFormat::IndexOnly),
        );
        let err = link
            .send(&Message::new(1, MessageType::Data, &b"x"[..]))
            .unwrap_err();
        assert!(matches!(
            err,
            LinkError::Frame(FrameError::FormatMismatch { .. })
        ));
        link.send(&Message::untyped(1, &b"x"[..])).unwrap();
    }

    #[test]
    fn rejects_oversized_payload() {
        let config = FrameConfig {
            max_payload_size: 8,
            ..FrameConfig::default()
        };
        let mut link = Link::new(
            Cursor::new(Vec::<u8>::new()),
            Vec::<u8>::new(),
            AdapterConfig::Plain.build(),
            config,
        );
        let err = link
            .send(&Message::new(1, MessageType::Data, vec![0u8; 9]))
            .unwrap_err();
        assert!(matches!(
            err,
            LinkError::Frame(FrameError::PayloadTooLarge { size: 9, max: 8 })
        ));
    }

    #[test]
    fn malformed_frame_then_recovery() {
        let mut wire: Vec<u8> = vec![0x02, 0xAA, 0xBB];
        wire.extend_from_slice(&[
            0x0A, 0x01, 0x12, 0x34, 0x56, 0x78, 0x48, 0x65, 0x6C, 0x6C, 0x6F,
        ]);

        let mut link = Link::new(
            Cursor::new(wire),
            std::io::sink(),
            AdapterConfig::Plain.build(),
            FrameConfig::default(),
        );
        assert!(matches!(
            link.recv(),
            Err(LinkError::Frame(FrameError::TruncatedFrame { .. }))
        ));
        assert_eq!(link.recv().unwrap().payload.as_ref(), b"Hello");
    }

    #[test]
    fn resync_discards_partial_frame() {
        let mut link = Link::new(
            Cursor::new(vec![0x0Au8, 0x01, 0x12]),
            std::io::sink(),
            AdapterConfig::Plain.build(),
            FrameConfig::default(),
        );
        assert!(matches!(link.recv(), Err(LinkError::Disconnected(_))));
        link.resync();
        assert_eq!(link.config().format, WireFormat::TypeTagged);
        assert_eq!(link.adapter().name(), "plain");
    }
}
