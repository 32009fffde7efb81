//! Single-frame receive helper shared by `sink` and `worker`: both only ever
//! deal in single-part messages, so both reduce a `ZmqMessage` down to its
//! first frame.

use zeromq::{SocketRecv, ZmqMessage};

use crate::error::FabricError;

pub(crate) async fn recv_one<S: SocketRecv>(socket: &mut S) -> Result<Vec<u8>, FabricError> {
    let message = socket.recv().await?;
    Ok(first_frame(message))
}

fn first_frame(message: ZmqMessage) -> Vec<u8> {
    message
        .into_vec()
        .into_iter()
        .next()
        .map(|b| b.to_vec())
        .unwrap_or_default()
}
