use bytes::Bytes;

use crate::adapter::ProtocolAdapter;

/// Additive byte cipher: every payload byte is shifted by a fixed key, mod 256.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftProtocol {
    key: u8,
}

impl ShiftProtocol {
    pub fn new(key: u8) -> Self {
        Self { key }
    }

    pub fn key(&self) -> u8 {
        self.key
    }

    fn shift_byte(&self, byte: u8) -> u8 {
        byte.wrapping_add(self.key)
    }

    fn unshift_byte(&self, byte: u8) -> u8 {
        byte.wrapping_sub(self.key)
    }
}

impl ProtocolAdapter for ShiftProtocol {
    fn name(&self) -> &'static str {
        "shift"
    }

    fn encode_payload(&self, payload: &Bytes) -> Bytes {
        payload.iter().map(|&b| self.shift_byte(b)).collect()
    }

    fn decode_payload(&self, payload: &Bytes) -> Bytes {
        payload.iter().map(|&b| self.unshift_byte(b)).collect()
    }
}
