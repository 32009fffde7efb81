//! Endpoint descriptor: describes *how* to obtain a socket without binding
//! to one. Materializing the same descriptor twice (potentially in
//! different processes) yields two independent sockets.

use std::collections::HashMap;
use std::time::Duration;

use tracing::info;
use zeromq::{PubSocket, PullSocket, PushSocket, RepSocket, ReqSocket, Socket, SubSocket};

use crate::error::FabricError;

/// The ZMQ socket kind named by an endpoint descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Push,
    Pull,
    Pub,
    Sub,
    Req,
    Rep,
}

impl Role {
    fn name(self) -> &'static str {
        match self {
            Role::Push => "PUSH",
            Role::Pull => "PULL",
            Role::Pub => "PUB",
            Role::Sub => "SUB",
            Role::Req => "REQ",
            Role::Rep => "REP",
        }
    }
}

/// Whether a materialized socket binds to its URL or connects to a peer
/// that has already bound it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Bind,
    Connect,
}

/// A live socket, uniformly typed regardless of which `Role` produced it.
/// Components that need a specific concrete socket type narrow it with
/// `into_push`/`into_pull`/etc., failing with `WrongSocketKind` if the
/// descriptor named the wrong role for their purpose.
pub enum AnySocket {
    Push(PushSocket),
    Pull(PullSocket),
    Pub(PubSocket),
    Sub(SubSocket),
    Req(ReqSocket),
    Rep(RepSocket),
}

impl AnySocket {
    fn kind_name(&self) -> &'static str {
        match self {
            AnySocket::Push(_) => "PUSH",
            AnySocket::Pull(_) => "PULL",
            AnySocket::Pub(_) => "PUB",
            AnySocket::Sub(_) => "SUB",
            AnySocket::Req(_) => "REQ",
            AnySocket::Rep(_) => "REP",
        }
    }

    pub fn into_push(self) -> Result<PushSocket, FabricError> {
        match self {
            AnySocket::Push(s) => Ok(s),
            other => Err(FabricError::WrongSocketKind {
                expected: "PUSH",
                got: other.kind_name(),
            }),
        }
    }

    pub fn into_pull(self) -> Result<PullSocket, FabricError> {
        match self {
            AnySocket::Pull(s) => Ok(s),
            other => Err(FabricError::WrongSocketKind {
                expected: "PULL",
                got: other.kind_name(),
            }),
        }
    }

    pub fn into_pub(self) -> Result<PubSocket, FabricError> {
        match self {
            AnySocket::Pub(s) => Ok(s),
            other => Err(FabricError::WrongSocketKind {
                expected: "PUB",
                got: other.kind_name(),
            }),
        }
    }

    pub fn into_sub(self) -> Result<SubSocket, FabricError> {
        match self {
            AnySocket::Sub(s) => Ok(s),
            other => Err(FabricError::WrongSocketKind {
                expected: "SUB",
                got: other.kind_name(),
            }),
        }
    }
}

/// Per-socket options. The only semantically recognized key is `subscribe`,
/// applied to `Sub` sockets as a ZMQ subscription filter.
pub type Options = HashMap<String, String>;

/// A declarative, immutable-after-construction description of a socket.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub url: Option<String>,
    pub role: Option<Role>,
    pub orientation: Orientation,
    pub options: Options,
    pub pre_delay: Option<Duration>,
    pub post_delay: Option<Duration>,
}

impl Endpoint {
    pub fn new(url: impl Into<String>, role: Role, orientation: Orientation) -> Self {
        Self {
            url: Some(url.into()),
            role: Some(role),
            orientation,
            options: Options::new(),
            pre_delay: None,
            post_delay: None,
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn with_pre_delay(mut self, delay: Duration) -> Self {
        self.pre_delay = Some(delay);
        self
    }

    pub fn with_post_delay(mut self, delay: Duration) -> Self {
        self.post_delay = Some(delay);
        self
    }

    /// Materialize with no overrides.
    pub async fn materialize(&self) -> Result<AnySocket, FabricError> {
        self.materialize_with(Overrides::default()).await
    }

    /// Merge `overrides` over this descriptor's fields (role/url/orientation
    /// replaced wholesale when present, options unioned with overrides
    /// winning on key conflict) and materialize the result. Never mutates
    /// `self` — the caller can materialize the same descriptor again with
    /// different overrides.
    pub async fn materialize_with(&self, overrides: Overrides) -> Result<AnySocket, FabricError> {
        let url = overrides.url.or_else(|| self.url.clone()).ok_or(FabricError::MissingUrl)?;
        let role = overrides.role.or(self.role).ok_or(FabricError::MissingRole)?;
        let orientation = overrides.orientation.unwrap_or(self.orientation);

        let mut options = self.options.clone();
        for (k, v) in overrides.options {
            options.insert(k, v);
        }

        let pre_delay = overrides.pre_delay.or(self.pre_delay);
        let post_delay = overrides.post_delay.or(self.post_delay);

        if let Some(delay) = pre_delay {
            tokio::time::sleep(delay).await;
        }

        let mut socket = make_socket(role);
        apply_options(&mut socket, &options).await?;

        info!(role = role.name(), %url, bind = orientation == Orientation::Bind, "materializing socket");
        match orientation {
            Orientation::Bind => bind(&mut socket, &url).await?,
            Orientation::Connect => connect(&mut socket, &url).await?,
        }

        if let Some(delay) = post_delay {
            tokio::time::sleep(delay).await;
        }

        Ok(socket)
    }
}

/// Field-level overrides applied on top of an `Endpoint` at materialization
/// time. `None`/empty fields leave the descriptor's own value untouched.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub role: Option<Role>,
    pub orientation: Option<Orientation>,
    pub options: Options,
    pub pre_delay: Option<Duration>,
    pub post_delay: Option<Duration>,
}

fn make_socket(role: Role) -> AnySocket {
    match role {
        Role::Push => AnySocket::Push(PushSocket::new()),
        Role::Pull => AnySocket::Pull(PullSocket::new()),
        Role::Pub => AnySocket::Pub(PubSocket::new()),
        Role::Sub => AnySocket::Sub(SubSocket::new()),
        Role::Req => AnySocket::Req(ReqSocket::new()),
        Role::Rep => AnySocket::Rep(RepSocket::new()),
    }
}

async fn apply_options(socket: &mut AnySocket, options: &Options) -> Result<(), FabricError> {
    if let AnySocket::Sub(sub) = socket {
        let filter = options.get("subscribe").map(String::as_str).unwrap_or("");
        sub.subscribe(filter).await?;
    }
    Ok(())
}

async fn bind(socket: &mut AnySocket, url: &str) -> Result<(), FabricError> {
    match socket {
        AnySocket::Push(s) => {
            s.bind(url).await?;
        }
        AnySocket::Pull(s) => {
            s.bind(url).await?;
        }
        AnySocket::Pub(s) => {
            s.bind(url).await?;
        }
        AnySocket::Sub(s) => {
            s.bind(url).await?;
        }
        AnySocket::Req(s) => {
            s.bind(url).await?;
        }
        AnySocket::Rep(s) => {
            s.bind(url).await?;
        }
    }
    Ok(())
}

async fn connect(socket: &mut AnySocket, url: &str) -> Result<(), FabricError> {
    match socket {
        AnySocket::Push(s) => {
            s.connect(url).await?;
        }
        AnySocket::Pull(s) => {
            s.connect(url).await?;
        }
        AnySocket::Pub(s) => {
            s.connect(url).await?;
        }
        AnySocket::Sub(s) => {
            s.connect(url).await?;
        }
        AnySocket::Req(s) => {
            s.connect(url).await?;
        }
        AnySocket::Rep(s) => {
            s.connect(url).await?;
        }
    }
    Ok(())
}
