use bytes::Bytes;

use crate::adapter::ProtocolAdapter;

/// Identity adapter: frames go out exactly as [`serialframe_frame::serialize`] writes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainProtocol;

impl PlainProtocol {
    pub fn new() -> Self {
        Self
    }
}

impl ProtocolAdapter for PlainProtocol {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn encode_payload(&self, payload: &Bytes) -> Bytes {
        payload.clone()
    }

    fn decode_payload(&self, payload: &Bytes) -> Bytes {
        payload.clone()
    }
}
