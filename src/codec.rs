//! Wire (protobuf) framing for the transaction record and its payload.
//!
//! Serialization framing is itself an external collaborator; this module is
//! the one concrete bridge the crate ships so
//! it can hash, sign, and round-trip its own test transactions. Real nodes
//! are free to swap in their own protobuf stack as long as the byte layout
//! matches.

use bytes::{Bytes, BytesMut};
use prost::Message;

use crate::error::CoreError;

/// The `data` field of a transaction: a type tag plus an opaque payload.
/// Marshaled with protobuf before being folded into the canonical hash
/// pre-image.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct TxData {
    #[prost(string, tag = "1")]
    pub r#type: String,
    #[prost(bytes = "vec", tag = "2")]
    pub payload: Vec<u8>,
}

impl TxData {
    pub fn new(type_: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        TxData {
            r#type: type_.into(),
            payload: payload.into(),
        }
    }

    pub fn encode_to_vec(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        // `Message::encode` on a well-formed buffer never fails; Bytes
        // writers have unbounded capacity.
        self.encode(&mut buf).expect("protobuf encode is infallible for BytesMut");
        buf.to_vec()
    }
}

/// The wire-level transaction record. `value`, `gas_price`, and
/// `gas_limit` are transported as fixed 16-byte big-endian byte strings;
/// `alg` is widened to `u32` on the wire.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct WireTransaction {
    #[prost(bytes = "vec", tag = "1")]
    pub hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub from: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub to: Vec<u8>,
    #[prost(bytes = "vec", tag = "4")]
    pub value: Vec<u8>,
    #[prost(uint64, tag = "5")]
    pub nonce: u64,
    #[prost(int64, tag = "6")]
    pub timestamp: i64,
    #[prost(message, optional, tag = "7")]
    pub data: Option<TxData>,
    #[prost(uint32, tag = "8")]
    pub chain_id: u32,
    #[prost(bytes = "vec", tag = "9")]
    pub gas_price: Vec<u8>,
    #[prost(bytes = "vec", tag = "10")]
    pub gas_limit: Vec<u8>,
    #[prost(uint32, tag = "11")]
    pub alg: u32,
    #[prost(bytes = "vec", tag = "12")]
    pub sign: Vec<u8>,
}

impl WireTransaction {
    pub fn encode_to_vec(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf).expect("protobuf encode is infallible for BytesMut");
        buf.to_vec()
    }

    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        WireTransaction::decode(Bytes::copy_from_slice(bytes))
            .map_err(|e| CoreError::HashAssembly(format!("wire transaction decode: {e}")))
    }
}
