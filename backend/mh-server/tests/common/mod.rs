#![allow(dead_code)]

//! Test infrastructure for mh-server tests

use mh_hub::{BroadcastConfig, ConnectionConfig, Hub, HubMetrics, ShutdownCoordinator};
use mh_server::{AppState, build_router};

use std::time::Duration;

use axum::Router;
use axum_test::TestServer;
use tokio::task::JoinHandle;

pub const TEST_MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Application state wired to a live hub
pub struct TestApp {
    pub state: AppState,
    pub hub_task: JoinHandle<()>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(ConnectionConfig::default())
    }

    pub fn with_config(config: ConnectionConfig) -> Self {
        let metrics = HubMetrics::new();
        let shutdown = ShutdownCoordinator::new();
        let (hub, hub_task) = Hub::spawn(
            BroadcastConfig::default(),
            metrics.clone(),
            shutdown.subscribe_guard(),
        );

        let state = AppState {
            hub,
            metrics,
            shutdown,
            config,
            max_message_size: TEST_MAX_MESSAGE_SIZE,
        };

        Self { state, hub_task }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Real HTTP transport, required for WebSocket upgrades
    pub fn server(&self) -> TestServer {
        TestServer::builder()
            .http_transport()
            .build(self.router())
            .expect("Failed to create test server")
    }

    /// Wait until the hub reports `expected` members
    pub async fn wait_for_clients(&self, expected: usize) {
        let hub = self.state.hub.clone();
        tokio::time::timeout(Duration::from_secs(2), async move {
            while hub.client_count().await != expected {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("hub never reached the expected client count");
    }
}
