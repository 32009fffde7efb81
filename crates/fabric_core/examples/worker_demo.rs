//! Squares each incoming integer and pushes the result onward, terminating
//! on `CLUSTER_WORKER_KILL`.
//!
//!     cargo run -p fabric_core --example worker_demo

use fabric_core::endpoint::{Endpoint, Orientation, Role};
use fabric_core::{Envelope, JsonCodec, Worker, WorkerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fabric_logging::init()?;

    let inbound = Endpoint::new("tcp://127.0.0.1:5557", Role::Pull, Orientation::Connect);
    let outbound = Endpoint::new("tcp://127.0.0.1:5558", Role::Push, Orientation::Bind);
    let command = Endpoint::new("tcp://127.0.0.1:5559", Role::Sub, Orientation::Connect)
        .with_option("subscribe", "");

    let mut worker: Worker<i32, i32, JsonCodec<i32>, JsonCodec<Envelope<i32>>> = Worker::connect(
        &inbound,
        &outbound,
        Some(&command),
        JsonCodec::default(),
        JsonCodec::default(),
        WorkerConfig::default(),
    )
    .await?;

    worker.run(|task: i32| Ok::<_, std::convert::Infallible>(task * task)).await?;
    tracing::info!("worker_demo: terminated on KILL_WORKER");
    Ok(())
}
