//! Strict sink: a decorator over the basic sink that unwraps envelopes and
//! raises on the first failure.

use std::time::Duration;

use fabric_protocol::{Codec, Envelope};

use crate::error::FabricError;
use crate::sink::{Sink, SinkEvent};

/// Wraps a [`Sink`], surfacing only payloads. The first `FAIL` envelope
/// terminates the sequence: every `recv_next` call after that returns
/// `Ok(None)` without touching the socket again.
pub struct StrictSink<R, C: Codec<Envelope<R>>> {
    inner: Sink<R, C>,
    done: bool,
}

impl<R, C: Codec<Envelope<R>>> StrictSink<R, C> {
    pub fn new(inner: Sink<R, C>) -> Self {
        Self { inner, done: false }
    }

    /// `Ok(Some(payload))` on success, `Ok(None)` on kill or after the
    /// sequence has already terminated, `Err(WorkerFailure)` on the first
    /// failure (which also sets the terminal state), and `Err(ReceiverTimeout)`
    /// passed straight through without terminating anything.
    pub async fn recv_next(&mut self, timeout: Option<Duration>) -> Result<Option<R>, FabricError> {
        if self.done {
            return Ok(None);
        }

        match self.inner.recv_next(timeout).await {
            Ok(SinkEvent::Envelope(Envelope::Success(payload))) => Ok(Some(payload)),
            Ok(SinkEvent::Envelope(Envelope::Failure(desc))) => {
                self.done = true;
                Err(FabricError::WorkerFailure(desc))
            }
            Ok(SinkEvent::Killed) => {
                self.done = true;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

// StrictSink's termination behavior is exercised end-to-end in
// fabric_core's integration tests (tests/strict_sink.rs), where a real
// Sink is constructed over a live socket pair.
