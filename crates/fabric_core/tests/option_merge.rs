//! S6: materializing an endpoint with override options unions them with the
//! descriptor's own options, the override winning on key conflict — proven
//! against a live PUB/SUB pair rather than just by comparing `HashMap`s.

mod common;

use std::time::Duration;

use fabric_core::endpoint::{Endpoint, Options, Orientation, Overrides, Role};
use zeromq::{SocketRecv, SocketSend, ZmqMessage};

#[tokio::test]
async fn s6_override_subscribe_filter_replaces_descriptor_default() {
    let url = common::tcp_url();

    let publisher_endpoint = Endpoint::new(url.clone(), Role::Pub, Orientation::Bind);
    let mut publisher = publisher_endpoint.materialize().await.unwrap().into_pub().unwrap();

    // Descriptor default subscribes to everything; override narrows it to
    // one topic. If the union didn't give override precedence, the
    // subscriber would receive "unwanted" too.
    let subscriber_descriptor =
        Endpoint::new(url, Role::Sub, Orientation::Connect).with_option("subscribe", "");
    let mut subscriber = subscriber_descriptor
        .materialize_with(Overrides {
            options: Options::from([("subscribe".to_string(), "wanted".to_string())]),
            ..Default::default()
        })
        .await
        .unwrap()
        .into_sub()
        .unwrap();

    // Give the subscribe handshake time to land before the first publish.
    tokio::time::sleep(Duration::from_millis(200)).await;

    publisher.send(ZmqMessage::from(b"unwanted-topic-frame".to_vec())).await.unwrap();
    publisher.send(ZmqMessage::from(b"wanted-topic-frame".to_vec())).await.unwrap();

    let received = subscriber.recv().await.unwrap();
    let bytes: Vec<u8> = received.into_vec().into_iter().next().unwrap().to_vec();
    assert_eq!(bytes, b"wanted-topic-frame");
}
