//! Typed wrappers over the command pub/sub channel shared by the worker,
//! sink, and forwarder relay.

use std::time::Duration;

use fabric_protocol::Command;
use tracing::info;
use zeromq::{PubSocket, SocketRecv, SocketSend, SubSocket, ZmqMessage};

use crate::endpoint::Endpoint;
use crate::error::FabricError;

/// A publisher on the command plane. Materialized from a Pub endpoint; the
/// mandatory one-second handshake delay is paid once, by the `kill_*`
/// constructors, before the very first publish.
pub struct CommandPublisher {
    socket: PubSocket,
}

impl CommandPublisher {
    /// Adopt an already-materialized Pub socket with no extra delay. Use
    /// this when the caller has already accounted for subscriber
    /// handshaking (e.g. via `Endpoint::post_delay`).
    pub fn from_socket(socket: PubSocket) -> Self {
        Self { socket }
    }

    /// Materialize `endpoint` as a Pub socket and sleep one second before
    /// returning, so the first `broadcast` isn't lost to late subscribers.
    async fn connect_with_handshake(endpoint: &Endpoint) -> Result<Self, FabricError> {
        let socket = endpoint.materialize().await?.into_pub()?;
        tokio::time::sleep(Duration::from_secs(1)).await;
        Ok(Self { socket })
    }

    /// Materializes `endpoint` and broadcasts `KillSink` after the
    /// handshake delay.
    pub async fn kill_sink(endpoint: &Endpoint) -> Result<(), FabricError> {
        let mut publisher = Self::connect_with_handshake(endpoint).await?;
        publisher.broadcast(Command::KillSink).await
    }

    /// Materializes `endpoint` and broadcasts `KillWorker` after the
    /// handshake delay.
    pub async fn kill_worker(endpoint: &Endpoint) -> Result<(), FabricError> {
        let mut publisher = Self::connect_with_handshake(endpoint).await?;
        publisher.broadcast(Command::KillWorker).await
    }

    /// Publishes `cmd`'s bare wire bytes.
    pub async fn broadcast(&mut self, cmd: Command) -> Result<(), FabricError> {
        self.socket.send(ZmqMessage::from(cmd.encode())).await?;
        info!("command plane: broadcast sent");
        Ok(())
    }
}

/// A subscriber on the command plane, always subscribed to every message.
pub struct CommandSubscriber {
    socket: SubSocket,
}

impl CommandSubscriber {
    pub fn from_socket(socket: SubSocket) -> Self {
        Self { socket }
    }

    pub async fn connect(endpoint: &Endpoint) -> Result<Self, FabricError> {
        let socket = endpoint
            .materialize_with(crate::endpoint::Overrides {
                options: crate::endpoint::Options::from([("subscribe".to_string(), String::new())]),
                ..Default::default()
            })
            .await?
            .into_sub()?;
        Ok(Self { socket })
    }

    /// Blocks for the next command on the wire.
    pub async fn recv(&mut self) -> Result<Command, FabricError> {
        let message = self.socket.recv().await?;
        let bytes = message
            .into_vec()
            .into_iter()
            .next()
            .map(|b| b.to_vec())
            .unwrap_or_default();
        Ok(Command::decode(&bytes))
    }
}
