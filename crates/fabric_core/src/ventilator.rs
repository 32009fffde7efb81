//! Ventilator: pushes a lazy sequence of task payloads onto an outbound
//! channel, absorbing the late-joiner race via an initial quiescent delay.

use std::marker::PhantomData;
use std::time::Duration;

use fabric_protocol::Codec;
use tokio::time::Instant;
use tracing::info;
use zeromq::{PushSocket, SocketSend, ZmqMessage};

use crate::endpoint::Endpoint;
use crate::error::FabricError;

/// How long the ventilator waits after setup before transmitting its first
/// task, to give late-joining workers a chance to complete their connect
/// handshake before messages start flowing (ZMQ's "late joiner syndrome").
#[derive(Debug, Clone, Copy)]
pub struct VentilatorConfig {
    pub worker_connect_delay: Duration,
}

impl Default for VentilatorConfig {
    fn default() -> Self {
        Self {
            worker_connect_delay: Duration::from_secs(1),
        }
    }
}

enum Outbound {
    Endpoint(Endpoint),
    Socket(PushSocket),
}

/// Produces tasks of type `T`, framed on the wire with codec `C`.
pub struct Ventilator<T, C: Codec<T>> {
    outbound: Option<Outbound>,
    config: VentilatorConfig,
    codec: C,
    sender: Option<PushSocket>,
    ready_at: Option<Instant>,
    _marker: PhantomData<T>,
}

impl<T, C: Codec<T>> Ventilator<T, C> {
    /// Materialize `endpoint` as a PUSH socket on first use.
    pub fn new(endpoint: Endpoint, codec: C, config: VentilatorConfig) -> Self {
        Self {
            outbound: Some(Outbound::Endpoint(endpoint)),
            config,
            codec,
            sender: None,
            ready_at: None,
            _marker: PhantomData,
        }
    }

    /// Adopt a caller-supplied, already-materialized PUSH socket instead of
    /// an endpoint descriptor.
    pub fn from_socket(socket: PushSocket, codec: C, config: VentilatorConfig) -> Self {
        Self {
            outbound: Some(Outbound::Socket(socket)),
            config,
            codec,
            sender: None,
            ready_at: None,
            _marker: PhantomData,
        }
    }

    /// Idempotent, lazy setup: materializes the socket (if not already
    /// adopted) and records the instant at which it becomes safe to send.
    async fn ensure_ready(&mut self) -> Result<(), FabricError> {
        if self.sender.is_some() {
            return Ok(());
        }

        info!("ventilator: starting setup");
        let socket = match self.outbound.take() {
            Some(Outbound::Endpoint(endpoint)) => endpoint.materialize().await?.into_push()?,
            Some(Outbound::Socket(socket)) => socket,
            None => unreachable!("ensure_ready only runs before sender is set"),
        };

        self.ready_at = Some(Instant::now() + self.config.worker_connect_delay);
        self.sender = Some(socket);
        info!("ventilator: setup done, ready to send");
        Ok(())
    }

    /// Reads tasks from `tasks`, frames each one, and pushes it onto the
    /// outbound socket. Blocks on the transport's back-pressure. Returns the
    /// number of tasks sent.
    pub async fn send<I>(&mut self, tasks: I) -> Result<usize, FabricError>
    where
        I: IntoIterator<Item = T>,
    {
        self.ensure_ready().await?;

        if let Some(ready_at) = self.ready_at {
            tokio::time::sleep_until(ready_at).await;
        }

        let sender = self.sender.as_mut().expect("ensure_ready guarantees Some");
        let mut sent = 0usize;
        for task in tasks {
            let bytes = self
                .codec
                .encode(&task)
                .map_err(|e| FabricError::Codec(e.to_string()))?;
            sender.send(ZmqMessage::from(bytes)).await?;
            sent += 1;
        }
        info!(sent, "ventilator: finished sending tasks");
        Ok(sent)
    }
}
