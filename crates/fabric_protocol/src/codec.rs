//! Generic wire codec for task and result payloads.
//!
//! The original implementation sent arbitrary in-memory objects directly
//! over the socket. Here the fabric is generic over a payload type `T` plus
//! a codec that knows how to turn it into bytes and back; both ends of a
//! channel must agree on the same codec.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ProtocolError;

/// Encodes/decodes a payload to/from a single wire frame.
pub trait Codec<T>: Clone + Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    fn encode(&self, value: &T) -> Result<Vec<u8>, Self::Error>;
    fn decode(&self, bytes: &[u8]) -> Result<T, Self::Error>;
}

/// The fabric-wide default codec: JSON via `serde_json`.
pub struct JsonCodec<T>(PhantomData<fn() -> T>);

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        Self(PhantomData)
    }
}

impl<T: Serialize + DeserializeOwned + 'static> Codec<T> for JsonCodec<T> {
    type Error = ProtocolError;

    fn encode(&self, value: &T) -> Result<Vec<u8>, Self::Error> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, Self::Error> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
