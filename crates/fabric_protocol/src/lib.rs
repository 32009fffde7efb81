//! Wire framing for the task-dispatch fabric.
//!
//! Tasks and results are framed as single self-delimited ZMQ frames; this
//! crate owns the serialization scheme (a generic [`Codec`]) and the
//! fabric-owned [`Envelope`] type that wraps a worker's outcome.

pub mod codec;
pub mod command;
pub mod envelope;
pub mod error;

pub use codec::{Codec, JsonCodec};
pub use command::Command;
pub use envelope::Envelope;
pub use error::ProtocolError;
