//! `CommandPublisher`/`CommandSubscriber` round-trip real commands, and
//! decode unrecognized wire bytes to `Unknown` rather than failing.

mod common;

use fabric_core::endpoint::{Endpoint, Orientation, Role};
use fabric_core::{Command, CommandPublisher, CommandSubscriber};

#[tokio::test]
async fn broadcast_kill_sink_is_observed_by_subscriber() {
    let url = common::tcp_url();
    let publisher_endpoint = Endpoint::new(url.clone(), Role::Pub, Orientation::Bind);
    let subscriber_endpoint = Endpoint::new(url, Role::Sub, Orientation::Connect);

    let mut subscriber = CommandSubscriber::connect(&subscriber_endpoint).await.unwrap();

    // kill_sink pays the one-second subscriber handshake delay itself.
    CommandPublisher::kill_sink(&publisher_endpoint).await.unwrap();

    let command = subscriber.recv().await.unwrap();
    assert_eq!(command, Command::KillSink);
}

#[tokio::test]
async fn broadcast_kill_worker_is_observed_by_subscriber() {
    let url = common::tcp_url();
    let publisher_endpoint = Endpoint::new(url.clone(), Role::Pub, Orientation::Bind);
    let subscriber_endpoint = Endpoint::new(url, Role::Sub, Orientation::Connect);

    let mut subscriber = CommandSubscriber::connect(&subscriber_endpoint).await.unwrap();

    CommandPublisher::kill_worker(&publisher_endpoint).await.unwrap();

    let command = subscriber.recv().await.unwrap();
    assert_eq!(command, Command::KillWorker);
}
