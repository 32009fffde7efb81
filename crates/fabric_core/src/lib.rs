//! A distributed task-dispatch fabric: a ventilator pushes task payloads to
//! a dynamic pool of workers, which apply a user callback and push result
//! envelopes onward to a sink, over a ZeroMQ transport. A separate
//! publish/subscribe command plane carries cooperative kill signals, and
//! two relay devices let either side of the pipeline fan in or out beyond a
//! single socket pair.

pub mod command_plane;
pub mod endpoint;
pub mod error;
mod framing;
pub mod relay;
pub mod sink;
pub mod ventilator;
pub mod worker;

pub use command_plane::{CommandPublisher, CommandSubscriber};
pub use endpoint::{AnySocket, Endpoint, Options, Orientation, Overrides, Role};
pub use error::FabricError;
pub use relay::{run_forwarder, run_streamer};
pub use sink::strict::StrictSink;
pub use sink::{Sink, SinkConfig, SinkEvent};
pub use ventilator::{Ventilator, VentilatorConfig};
pub use worker::{Worker, WorkerCallbackError, WorkerConfig};

pub use fabric_protocol::{Codec, Command, Envelope, JsonCodec, ProtocolError};
