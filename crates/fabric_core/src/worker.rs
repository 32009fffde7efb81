//! Worker: pulls a task, applies the user callback, pushes a result
//! envelope, and concurrently watches the command channel for a kill.

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use fabric_protocol::{Codec, Command, Envelope};
use tracing::{info, warn};
use zeromq::{PullSocket, PushSocket, SocketSend, SubSocket, ZmqMessage};

use crate::endpoint::Endpoint;
use crate::error::FabricError;
use crate::framing::recv_one;

/// Error returned by a user callback for a single task. The worker never
/// lets this (or a panic) escape its run loop — both are marshalled into a
/// `Failure` envelope.
pub trait WorkerCallbackError: fmt::Display + Send + 'static {}
impl<E: fmt::Display + Send + 'static> WorkerCallbackError for E {}

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerConfig {
    /// `None` blocks indefinitely; `Some(d)` raises `ReceiverTimeout` if
    /// neither socket has anything ready within `d`.
    pub receive_timeout: Option<Duration>,
}

/// A worker bound to live PULL/PUSH sockets and an optional command SUB.
/// `Ct` codes the bare task payload; `Cr` codes the *envelope* wrapping the
/// result, not the bare payload — the sink on the other end decodes the
/// same `Envelope<R>` shape.
pub struct Worker<T, R, Ct, Cr> {
    inbound: PullSocket,
    outbound: PushSocket,
    command: Option<SubSocket>,
    task_codec: Ct,
    result_codec: Cr,
    config: WorkerConfig,
    _marker: std::marker::PhantomData<(T, R)>,
}

impl<T, R, Ct, Cr> Worker<T, R, Ct, Cr>
where
    Ct: Codec<T>,
    Cr: Codec<Envelope<R>>,
{
    /// Materializes the inbound PULL, outbound PUSH, and (if `command` is
    /// given) a match-all command SUB socket.
    pub async fn connect(
        inbound: &Endpoint,
        outbound: &Endpoint,
        command: Option<&Endpoint>,
        task_codec: Ct,
        result_codec: Cr,
        config: WorkerConfig,
    ) -> Result<Self, FabricError> {
        info!("worker: starting setup");
        let inbound_socket = inbound.materialize().await?.into_pull()?;
        let outbound_socket = outbound.materialize().await?.into_push()?;
        let command_socket = match command {
            Some(endpoint) => Some(endpoint.materialize().await?.into_sub()?),
            None => None,
        };
        info!("worker: setup done");

        Ok(Self {
            inbound: inbound_socket,
            outbound: outbound_socket,
            command: command_socket,
            task_codec,
            result_codec,
            config,
            _marker: std::marker::PhantomData,
        })
    }

    /// Runs the receive/callback/send loop until a `KillWorker` command
    /// arrives (returns `Ok(())`) or a transport/timeout error occurs.
    ///
    /// `callback` must be total: any error it returns is wrapped as a
    /// `Failure` envelope, and any panic it raises is caught the same way.
    /// Only transport errors escape this loop.
    pub async fn run<F, E>(&mut self, callback: F) -> Result<(), FabricError>
    where
        F: Fn(T) -> Result<R, E> + Send + Sync,
        E: WorkerCallbackError,
    {
        loop {
            let outcome = self.poll_once().await?;
            match outcome {
                PollOutcome::Inbound(frame) => {
                    self.handle_task(&callback, frame).await?;
                }
                PollOutcome::Command(bytes) => {
                    let cmd = Command::decode(&bytes);
                    if cmd.is_kill_worker() {
                        info!("worker: received KILL_WORKER, terminating");
                        return Ok(());
                    }
                    // KillSink and Unknown commands are not ours: ignore.
                }
            }
        }
    }

    async fn handle_task<F, E>(&mut self, callback: &F, frame: Vec<u8>) -> Result<(), FabricError>
    where
        F: Fn(T) -> Result<R, E> + Send + Sync,
        E: WorkerCallbackError,
    {
        let envelope = match self.task_codec.decode(&frame) {
            Ok(task) => match std::panic::catch_unwind(AssertUnwindSafe(|| callback(task))) {
                Ok(Ok(result)) => Envelope::Success(result),
                Ok(Err(err)) => Envelope::Failure(err.to_string()),
                Err(panic) => Envelope::Failure(describe_panic(panic)),
            },
            Err(decode_err) => Envelope::Failure(decode_err.to_string()),
        };

        let encoded = self
            .result_codec
            .encode(&envelope)
            .map_err(|e| FabricError::Codec(e.to_string()))?;
        self.outbound.send(ZmqMessage::from(encoded)).await?;
        Ok(())
    }

    /// One poll of both sockets (if a command socket is configured),
    /// honoring the configured `receive_timeout`.
    async fn poll_once(&mut self) -> Result<PollOutcome, FabricError> {
        match self.config.receive_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.poll_inner())
                .await
                .map_err(|_elapsed| FabricError::ReceiverTimeout)?,
            None => self.poll_inner().await,
        }
    }

    /// The tie-break: when both the inbound and command sockets are ready
    /// at once, `biased` makes `select!` resolve the inbound branch first,
    /// so an in-flight task's envelope is always emitted before a pending
    /// kill is even looked at.
    async fn poll_inner(&mut self) -> Result<PollOutcome, FabricError> {
        match &mut self.command {
            Some(command) => {
                tokio::select! {
                    biased;
                    frame = recv_one(&mut self.inbound) => frame.map(PollOutcome::Inbound),
                    cmd = recv_one(command) => cmd.map(PollOutcome::Command),
                }
            }
            None => recv_one(&mut self.inbound).await.map(PollOutcome::Inbound),
        }
    }
}

enum PollOutcome {
    Inbound(Vec<u8>),
    Command(Vec<u8>),
}

fn describe_panic(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("worker callback panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("worker callback panicked: {s}")
    } else {
        "worker callback panicked with a non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_panic_extracts_str_payload() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("bad");
        assert!(describe_panic(payload).contains("bad"));
    }

    #[test]
    fn describe_panic_extracts_string_payload() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("bad".to_string());
        assert!(describe_panic(payload).contains("bad"));
    }
}
