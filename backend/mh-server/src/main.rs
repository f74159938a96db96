use mh_server::{AppState, build_router, logger};

use mh_hub::{BroadcastConfig, ConnectionConfig, Hub, HubMetrics, ShutdownCoordinator};

use std::error::Error;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = mh_config::Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting mh-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let metrics = HubMetrics::new();
    let shutdown = ShutdownCoordinator::new();

    // Start the hub control loop
    let (hub, hub_task) = Hub::spawn(
        BroadcastConfig {
            command_buffer_size: config.hub.command_buffer_size,
        },
        metrics.clone(),
        shutdown.subscribe_guard(),
    );
    info!("Hub started");

    let app_state = AppState {
        hub,
        metrics,
        shutdown: shutdown.clone(),
        config: ConnectionConfig {
            send_buffer_size: config.hub.send_buffer_size,
            relay_inbound: config.hub.relay_inbound,
        },
        max_message_size: config.hub.max_message_size,
    };

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let listener = TcpListener::bind(config.bind_addr()).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    let mut guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            guard.wait().await;
        })
        .await?;

    // Serve can also end on its own; make sure the hub releases its members
    shutdown.shutdown();
    if let Err(e) = hub_task.await {
        warn!("Hub task ended abnormally: {}", e);
    }

    info!("Graceful shutdown complete");
    Ok(())
}
