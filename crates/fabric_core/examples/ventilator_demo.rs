//! Pushes ten integer tasks onto a PUSH socket and exits.
//!
//! Run alongside `worker_demo` and `sink_demo`:
//!     cargo run -p fabric_core --example ventilator_demo

use fabric_core::endpoint::{Endpoint, Orientation, Role};
use fabric_core::{JsonCodec, Ventilator, VentilatorConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fabric_logging::init()?;

    let endpoint = Endpoint::new("tcp://127.0.0.1:5557", Role::Push, Orientation::Bind);
    let mut ventilator: Ventilator<i32, JsonCodec<i32>> =
        Ventilator::new(endpoint, JsonCodec::default(), VentilatorConfig::default());

    let sent = ventilator.send(1..=10).await?;
    tracing::info!(sent, "ventilator_demo: done");
    Ok(())
}
