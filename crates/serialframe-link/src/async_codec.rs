use bytes::BytesMut;
use serialframe_frame::{FrameConfig, Message, MessageCodec, Result as FrameResult};
use serialframe_protocol::{AdapterHandle, ProtocolAdapter};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{LinkError, Result};

/// [`MessageCodec`] with an adapter applied in both directions.
///
/// Like the inner codec, a malformed frame is yielded as an `Err` item and
/// decoding continues with the next frame.
pub struct AdapterCodec {
    inner: MessageCodec,
    adapter: AdapterHandle,
    config: FrameConfig,
}

impl AdapterCodec {
    pub fn new(adapter: AdapterHandle, config: FrameConfig) -> Self {
        Self {
            inner: MessageCodec::new(config),
            adapter,
            config,
        }
    }

    /// Drop any partial frame.
    pub fn resync(&mut self) {
        self.inner.reset();
    }

    fn open(&self, item: Option<FrameResult<Message>>) -> Option<Result<Message>> {
        item.map(|result| {
            result
                .map(|message| self.adapter.open(message))
                .map_err(LinkError::from)
        })
    }
}

impl Decoder for AdapterCodec {
    type Item = Result<Message>;
    type Error = LinkError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Result<Message>>> {
        let item = self.inner.decode(src)?;
        Ok(self.open(item))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Result<Message>>> {
        let item = self.inner.decode_eof(src)?;
        Ok(self.open(item))
    }
}

impl Encoder<&Message> for AdapterCodec {
    type Error = LinkError;

    fn encode(&mut self, item: &Message, dst: &mut BytesMut) -> Result<()> {
        self.config.check_outgoing(item)?;
        let frame = self.adapter.encode(item)?;
        dst.extend_from_slice(&frame);
        Ok(())
    }
}

impl Encoder<Message> for AdapterCodec {
    type Error = LinkError;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<()> {
        Encoder::<&Message>::encode(self, &item, dst)
    }
}
