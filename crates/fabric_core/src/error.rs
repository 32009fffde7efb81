//! Fabric-wide error type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FabricError {
    #[error("endpoint descriptor has no URL configured")]
    MissingUrl,

    #[error("endpoint descriptor has no socket role configured")]
    MissingRole,

    #[error("endpoint materialized to the wrong socket kind: expected {expected}, got {got}")]
    WrongSocketKind {
        expected: &'static str,
        got: &'static str,
    },

    #[error("receive timed out with nothing ready")]
    ReceiverTimeout,

    #[error("worker reported a failure: {0}")]
    WorkerFailure(String),

    #[error("wire codec error: {0}")]
    Codec(String),

    #[error("transport error: {0}")]
    Transport(#[from] zeromq::ZmqError),

    #[error("component is closed")]
    Closed,
}
