//! Collects ten result envelopes from the worker pool and prints them.
//!
//!     cargo run -p fabric_core --example sink_demo

use fabric_core::endpoint::{Endpoint, Orientation, Role};
use fabric_core::{Envelope, JsonCodec, Sink, SinkConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fabric_logging::init()?;

    let results = Endpoint::new("tcp://127.0.0.1:5558", Role::Pull, Orientation::Connect);
    let command = Endpoint::new("tcp://127.0.0.1:5559", Role::Sub, Orientation::Connect)
        .with_option("subscribe", "");

    let mut sink: Sink<i32, JsonCodec<Envelope<i32>>> =
        Sink::connect(&results, Some(&command), JsonCodec::default(), SinkConfig::default()).await?;

    for outcome in sink.receive(Some(10), None).await {
        match outcome {
            Ok(value) => println!("result: {value}"),
            Err(err) => println!("failure: {err}"),
        }
    }

    Ok(())
}
