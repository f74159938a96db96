pub mod broadcast_config;
pub mod client;
pub mod client_handle;
pub mod client_id;
pub mod client_state;
pub mod connection;
pub mod connection_config;
pub mod error;
pub mod hub;
pub mod hub_command;
pub mod metrics;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod web_socket_connection;

pub use broadcast_config::BroadcastConfig;
pub use client::{Client, ClientTasks};
pub use client_handle::ClientHandle;
pub use client_id::ClientId;
pub use client_state::ClientState;
pub use connection::{Connection, FrameReader, FrameWriter};
pub use connection_config::ConnectionConfig;
pub use error::{HubError, Result};
pub use hub::Hub;
pub use hub_command::HubCommand;
pub use metrics::HubMetrics;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use web_socket_connection::{WebSocketConnection, WebSocketReader, WebSocketWriter};
