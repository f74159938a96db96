use mh_hub::{ConnectionConfig, Hub, HubMetrics, ShutdownCoordinator};

/// Shared application state for HTTP and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub hub: Hub,
    pub metrics: HubMetrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
    /// Largest inbound WebSocket message accepted, in bytes
    pub max_message_size: usize,
}
