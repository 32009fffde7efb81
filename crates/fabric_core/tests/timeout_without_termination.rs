//! S5: a receive timeout is surfaced to the caller but does not terminate
//! the sink — a later call against the same socket can still succeed.

mod common;

use std::time::Duration;

use fabric_core::endpoint::{Endpoint, Orientation, Role};
use fabric_core::{Codec, Envelope, FabricError, JsonCodec, Sink, SinkConfig, SinkEvent};
use zeromq::{PushSocket, Socket, SocketSend, ZmqMessage};

#[tokio::test]
async fn s5_timeout_does_not_terminate_the_sink() {
    let results_url = common::tcp_url();

    let mut producer = PushSocket::new();
    producer.bind(&results_url).await.unwrap();

    let results_endpoint = Endpoint::new(results_url, Role::Pull, Orientation::Connect);
    let mut sink: Sink<i32, JsonCodec<Envelope<i32>>> = Sink::connect(
        &results_endpoint,
        None,
        JsonCodec::default(),
        SinkConfig::default(),
    )
    .await
    .unwrap();

    let timed_out = sink.recv_next(Some(Duration::from_millis(100))).await;
    assert!(matches!(timed_out, Err(FabricError::ReceiverTimeout)));

    let codec = JsonCodec::<Envelope<i32>>::default();
    producer
        .send(ZmqMessage::from(codec.encode(&Envelope::Success(42)).unwrap()))
        .await
        .unwrap();

    let recovered = sink.recv_next(Some(Duration::from_secs(5))).await.unwrap();
    assert_eq!(recovered, SinkEvent::Envelope(Envelope::Success(42)));
}

/// `Sink::receive` is the one Vec-returning convenience wrapper: a timeout
/// must end *that call*, surfaced as its final entry, without collecting
/// anything further — a separate, later `receive` call is what may still
/// succeed, not a continuation of the timed-out one.
#[tokio::test]
async fn receive_stops_after_first_timeout_instead_of_looping_forever() {
    let results_url = common::tcp_url();

    let mut producer = PushSocket::new();
    producer.bind(&results_url).await.unwrap();

    let results_endpoint = Endpoint::new(results_url, Role::Pull, Orientation::Connect);
    let mut sink: Sink<i32, JsonCodec<Envelope<i32>>> = Sink::connect(
        &results_endpoint,
        None,
        JsonCodec::default(),
        SinkConfig::default(),
    )
    .await
    .unwrap();

    let codec = JsonCodec::<Envelope<i32>>::default();
    producer
        .send(ZmqMessage::from(codec.encode(&Envelope::Success(1)).unwrap()))
        .await
        .unwrap();

    // No expected_count: without the fix this call would never return,
    // since the second recv_next() times out and a buggy loop would keep
    // polling instead of stopping.
    let results = sink.receive(None, Some(Duration::from_millis(100))).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap(), &1);
    assert!(matches!(results[1], Err(FabricError::ReceiverTimeout)));

    // The sink itself survived: a later call can still succeed.
    producer
        .send(ZmqMessage::from(codec.encode(&Envelope::Success(2)).unwrap()))
        .await
        .unwrap();
    let recovered = sink.recv_next(Some(Duration::from_secs(5))).await.unwrap();
    assert_eq!(recovered, SinkEvent::Envelope(Envelope::Success(2)));
}
