use crate::{ClientHandle, ClientId};

use bytes::Bytes;
use tokio::sync::oneshot;

/// A request served by the hub control loop, one at a time, in submission order
#[derive(Debug)]
pub enum HubCommand {
    Register(ClientHandle),
    Unregister(ClientId),
    Broadcast(Bytes),
    ClientCount(oneshot::Sender<usize>),
    Contains(ClientId, oneshot::Sender<bool>),
}

impl HubCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Register(_) => "register",
            Self::Unregister(_) => "unregister",
            Self::Broadcast(_) => "broadcast",
            Self::ClientCount(_) => "client_count",
            Self::Contains(..) => "contains",
        }
    }
}
