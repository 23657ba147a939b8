//! `tokio_util` codec over the same reassembly state machine.

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{serialize_into, FrameConfig};
use crate::error::{FrameError, Result};
use crate::message::Message;
use crate::receiver::FrameReceiver;

/// Frames [`Message`] values for `FramedRead` / `FramedWrite`.
///
/// The decoder drains the read buffer into its [`FrameReceiver`] byte by
/// byte, so the codec instance must stay with the one task that owns the
/// read half.
///
/// Decoded items are `Result<Message>`: a malformed frame is yielded as an
/// `Err` item and the stream keeps going with the next frame. The decoder
/// itself only fails when the stream ends mid-frame, which `FramedRead`
/// treats as the end of the stream.
#[derive(Debug, Clone)]
pub struct MessageCodec {
    receiver: FrameReceiver,
    config: FrameConfig,
}

impl MessageCodec {
    pub fn new(config: FrameConfig) -> Self {
        Self {
            receiver: FrameReceiver::with_config(config),
            config,
        }
    }

    /// Drop any partial frame.
    pub fn reset(&mut self) {
        self.receiver.reset();
    }

    pub fn receiver(&self) -> &FrameReceiver {
        &self.receiver
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl Default for MessageCodec {
    fn default() -> Self {
        Self::new(FrameConfig::default())
    }
}

impl Decoder for MessageCodec {
    type Item = Result<Message>;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Result<Message>>> {
        while src.has_remaining() {
            if let Some(result) = self.receiver.feed_byte(src.get_u8()) {
                return Ok(Some(result));
            }
        }
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Result<Message>>> {
        match self.decode(src)? {
            Some(item) => Ok(Some(item)),
            None if self.receiver.is_idle() => Ok(None),
            None => Err(FrameError::ConnectionClosed),
        }
    }
}

impl Encoder<Message> for MessageCodec {
    type Error = FrameError;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<()> {
        Encoder::<&Message>::encode(self, &item, dst)
    }
}

impl Encoder<&Message> for MessageCodec {
    type Error = FrameError;

    fn encode(&mut self, item: &Message, dst: &mut BytesMut) -> Result<()> {
        self.config.check_outgoing(item)?;
        serialize_into(item, dst)
    }
}

#[cfg(test)]
mod tests {
    use futures_util::{SinkExt, StreamExt};
    use tokio_util::codec::{FramedRead, FramedWrite};

    use super::*;
    use crate::codec::WireFormat;
    use crate::message_type::MessageType;

    #[tokio::test]
    async fn framed_roundtrip() {
        let msgs = vec![
            Message::new(1, MessageType::Command, &b"Hello"[..]),
            Message::new(2, MessageType::Heartbeat, &b""[..]),
            Message::new(3, MessageType::Data, vec![0x00u8, 0xFF]),
        ];

        let mut sink = FramedWrite::new(Vec::new(), MessageCodec::default());
        for msg in &msgs {
            sink.send(msg.clone()).await.unwrap();
        }
        let wire = sink.into_inner();

        let mut stream = FramedRead::new(wire.as_slice(), MessageCodec::default());
        for expected in &msgs {
            assert_eq!(&stream.next().await.unwrap().unwrap().unwrap(), expected);
        }
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn malformed_frame_does_not_end_stream() {
        let mut wire = vec![0x02u8, 0x01, 0x00];
        wire.extend_from_slice(&[
            0x0A, 0x01, 0x12, 0x34, 0x56, 0x78, 0x48, 0x65, 0x6C, 0x6C, 0x6F,
        ]);

        let mut stream = FramedRead::new(wire.as_slice(), MessageCodec::default());
        let first = stream.next().await.unwrap().unwrap();
        assert!(matches!(
            first,
            Err(FrameError::TruncatedFrame { len: 3, min: 6 })
        ));
        let second = stream.next().await.unwrap().unwrap().unwrap();
        assert_eq!(
            second,
            Message::new(0x12345678, MessageType::Command, &b"Hello"[..])
        );
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn eof_mid_frame_is_error() {
        let wire: &[u8] = &[0x0A, 0x01, 0x12];
        let mut stream = FramedRead::new(wire, MessageCodec::default());
        let err = stream.next().await.unwrap().unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn decode_keeps_partial_state_across_calls() {
        let mut codec = MessageCodec::new(FrameConfig::for_format(WireFormat::IndexOnly));
        let mut first = BytesMut::from(&[0x05, 0x00, 0x00][..]);
        assert!(codec.decode(&mut first).unwrap().is_none());
        assert!(first.is_empty());
        assert_eq!(codec.receiver().buffered(), 3);

        let mut second = BytesMut::from(&[0x00, 0x2A, 0x7E][..]);
        let msg = codec.decode(&mut second).unwrap().unwrap().unwrap();
        assert_eq!(msg, Message::untyped(42, &b"~"[..]));
    }

    #[test]
    fn encoder_rejects_message_in_other_format() {
        let mut codec = MessageCodec::new(FrameConfig::for_format(WireFormat::IndexOnly));
        let mut dst = BytesMut::new();
        let err = codec
            .encode(
                Message::new(0x12345678, MessageType::Command, &b"Hello"[..]),
                &mut dst,
            )
            .unwrap_err();
        assert!(matches!(err, FrameError::FormatMismatch { .. }));
        assert!(dst.is_empty());
    }

    #[test]
    fn encoder_rejects_oversized_payload() {
        let mut codec = MessageCodec::default();
        let mut dst = BytesMut::new();
        let err = codec
            .encode(Message::new(1, MessageType::Data, vec![0u8; 251]), &mut dst)
            .unwrap_err();
        assert!(matches!(err, FrameError::PayloadTooLarge { .. }));
        assert!(dst.is_empty());
    }
}
