#![allow(dead_code)]

use crate::common::memory_connection::{MemoryPeer, memory_pair};

use mh_hub::{
    BroadcastConfig, Client, ClientState, ClientTasks, ConnectionConfig, Hub, HubMetrics,
    ShutdownCoordinator,
};

use tokio::task::JoinHandle;
use tokio::time::{Duration, timeout};

/// Default frames a peer can buffer before the client's writes block
pub const PEER_WRITE_CAPACITY: usize = 64;

pub struct TestHub {
    pub hub: Hub,
    pub shutdown: ShutdownCoordinator,
    pub task: JoinHandle<()>,
    pub config: ConnectionConfig,
}

impl TestHub {
    pub fn new() -> Self {
        Self::with_config(ConnectionConfig::default())
    }

    pub fn with_config(config: ConnectionConfig) -> Self {
        let shutdown = ShutdownCoordinator::new();
        let (hub, task) = Hub::spawn(
            BroadcastConfig::default(),
            HubMetrics::new(),
            shutdown.subscribe_guard(),
        );

        Self {
            hub,
            shutdown,
            task,
            config,
        }
    }

    /// Accept a client over an in-memory connection
    pub async fn connect(&self) -> (ClientTasks, MemoryPeer) {
        self.connect_with_capacity(PEER_WRITE_CAPACITY).await
    }

    pub async fn connect_with_capacity(&self, write_capacity: usize) -> (ClientTasks, MemoryPeer) {
        self.connect_with(self.config.clone(), write_capacity).await
    }

    /// Accept a client with its own settings instead of the hub-wide ones
    pub async fn connect_with(
        &self,
        config: ConnectionConfig,
        write_capacity: usize,
    ) -> (ClientTasks, MemoryPeer) {
        let (connection, peer) = memory_pair(write_capacity);
        let tasks = Client::accept(connection, self.hub.clone(), config, HubMetrics::new()).await;
        (tasks, peer)
    }
}

/// Wait for a client to reach `Closed`, failing the test if it never does
pub async fn wait_closed(tasks: &mut ClientTasks) {
    timeout(Duration::from_secs(2), tasks.closed())
        .await
        .expect("client should reach the closed state");
}

/// Wait for a client to report `state`, failing the test if it never does
pub async fn wait_for_state(tasks: &ClientTasks, state: ClientState) {
    timeout(Duration::from_secs(2), async {
        while tasks.state() != state {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("client should reach the {state} state, is {}", tasks.state()));
}
