//! Basic sink: pulls result envelopes with per-message timeouts, bounded by
//! an expected count or an external kill.

use std::time::Duration;

use fabric_protocol::{Codec, Command, Envelope};
use tracing::info;
use zeromq::{PullSocket, SubSocket};

use crate::endpoint::Endpoint;
use crate::error::FabricError;
use crate::framing::recv_one;

pub mod strict;

#[derive(Debug, Clone, Copy, Default)]
pub struct SinkConfig {
    pub receive_timeout: Option<Duration>,
}

/// One event surfaced by `Sink::recv_next`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent<R> {
    Envelope(Envelope<R>),
    /// A `KillSink` command arrived; the caller should stop requesting more.
    Killed,
}

/// A sink bound to a live PULL socket and an optional command SUB. `C`
/// codes the envelope on the wire, not the bare payload — the sink reads
/// `Envelope<R>` frames, the same shape the worker writes.
pub struct Sink<R, C: Codec<Envelope<R>>> {
    receiver: PullSocket,
    command: Option<SubSocket>,
    codec: C,
    config: SinkConfig,
    _marker: std::marker::PhantomData<R>,
}

impl<R, C: Codec<Envelope<R>>> Sink<R, C> {
    pub async fn connect(
        results: &Endpoint,
        command: Option<&Endpoint>,
        codec: C,
        config: SinkConfig,
    ) -> Result<Self, FabricError> {
        info!("sink: starting setup");
        let receiver = results.materialize().await?.into_pull()?;
        let command_socket = match command {
            Some(endpoint) => Some(endpoint.materialize().await?.into_sub()?),
            None => None,
        };
        info!("sink: setup done");

        Ok(Self {
            receiver,
            command: command_socket,
            codec,
            config,
            _marker: std::marker::PhantomData,
        })
    }

    /// The atomic primitive: one poll, yielding an envelope, a kill
    /// notification, or `Err(ReceiverTimeout)`. A timeout never terminates
    /// the sink — a later call can still succeed.
    pub async fn recv_next(&mut self, timeout: Option<Duration>) -> Result<SinkEvent<R>, FabricError> {
        let effective_timeout = timeout.or(self.config.receive_timeout);

        loop {
            let outcome = match effective_timeout {
                Some(t) => tokio::time::timeout(t, self.poll_inner())
                    .await
                    .map_err(|_elapsed| FabricError::ReceiverTimeout)?,
                None => self.poll_inner().await,
            }?;

            match outcome {
                RawOutcome::Result(frame) => {
                    let envelope = self
                        .codec
                        .decode(&frame)
                        .map_err(|e| FabricError::Codec(e.to_string()))?;
                    return Ok(SinkEvent::Envelope(envelope));
                }
                RawOutcome::Command(bytes) => {
                    let cmd = Command::decode(&bytes);
                    if cmd.is_kill_sink() {
                        info!("sink: received KILL_SINK");
                        return Ok(SinkEvent::Killed);
                    }
                    // Unknown commands are no-ops: poll again.
                }
            }
        }
    }

    /// Drives `recv_next` in a loop until `expected_count` results have
    /// arrived (if given), a kill is observed, or a timeout elapses. The
    /// timeout is surfaced as the final `Err` entry rather than swallowed —
    /// it ends this call the same way a kill does; a separate, later call
    /// to `receive`/`recv_next` is what may still succeed.
    pub async fn receive(
        &mut self,
        expected_count: Option<usize>,
        timeout: Option<Duration>,
    ) -> Vec<Result<R, FabricError>> {
        let mut out = Vec::new();
        loop {
            if let Some(limit) = expected_count {
                if out.len() >= limit {
                    break;
                }
            }

            match self.recv_next(timeout).await {
                Ok(SinkEvent::Envelope(envelope)) => match envelope.into_result() {
                    Ok(payload) => out.push(Ok(payload)),
                    Err(desc) => out.push(Err(FabricError::WorkerFailure(desc))),
                },
                Ok(SinkEvent::Killed) => break,
                Err(err) => {
                    out.push(Err(err));
                    break;
                }
            }
        }
        out
    }

    async fn poll_inner(&mut self) -> Result<RawOutcome, FabricError> {
        match &mut self.command {
            Some(command) => {
                tokio::select! {
                    biased;
                    frame = recv_one(&mut self.receiver) => frame.map(RawOutcome::Result),
                    cmd = recv_one(command) => cmd.map(RawOutcome::Command),
                }
            }
            None => recv_one(&mut self.receiver).await.map(RawOutcome::Result),
        }
    }
}

enum RawOutcome {
    Result(Vec<u8>),
    Command(Vec<u8>),
}

/// Materializes a PUB socket from `endpoint`, waits one second for
/// subscriber handshaking, and publishes `KILL_SINK`. A thin re-export of
/// `CommandPublisher::kill_sink` under the name a sink-side caller expects.
pub async fn send_kill(endpoint: &Endpoint) -> Result<(), FabricError> {
    crate::command_plane::CommandPublisher::kill_sink(endpoint).await
}
