//! Relay devices: stateless fan-in/fan-out forwarders that decouple N
//! producers from M consumers at the transport level. Each is a blocking,
//! run-to-completion routine with no application-level state and no error
//! recovery beyond what the transport provides.

use tracing::info;
use zeromq::{SocketRecv, SocketSend};

use crate::endpoint::{Endpoint, Orientation, Overrides, Role};
use crate::error::FabricError;

/// Binds a PULL frontend and a PUSH backend, forwarding each frame
/// verbatim. Lets arbitrarily many ventilators fan into one logical pull
/// point and arbitrarily many workers fan out from it. Role and
/// orientation are pinned regardless of what `frontend`/`backend`
/// themselves carry — only their URL and options travel through.
pub async fn run_streamer(frontend: &Endpoint, backend: &Endpoint) -> Result<(), FabricError> {
    let mut front = frontend.materialize_with(pinned(Role::Pull)).await?.into_pull()?;
    let mut back = backend.materialize_with(pinned(Role::Push)).await?.into_push()?;
    info!("streamer: forwarding frontend -> backend");

    loop {
        let frame = front.recv().await?;
        back.send(frame).await?;
    }
}

/// Binds a SUB frontend (subscribed to everything) and a PUB backend,
/// forwarding each frame verbatim. Used to scale the command plane beyond
/// direct publisher-to-subscriber connections.
pub async fn run_forwarder(frontend: &Endpoint, backend: &Endpoint) -> Result<(), FabricError> {
    let mut front = frontend
        .materialize_with(Overrides {
            role: Some(Role::Sub),
            orientation: Some(Orientation::Bind),
            options: crate::endpoint::Options::from([("subscribe".to_string(), String::new())]),
            ..Default::default()
        })
        .await?
        .into_sub()?;
    let mut back = backend.materialize_with(pinned(Role::Pub)).await?.into_pub()?;
    info!("forwarder: forwarding frontend -> backend");

    loop {
        let frame = front.recv().await?;
        back.send(frame).await?;
    }
}

fn pinned(role: Role) -> Overrides {
    Overrides {
        role: Some(role),
        orientation: Some(Orientation::Bind),
        ..Default::default()
    }
}
