use crate::{AppState, api, health, ws};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        // Agent ingestion
        .route("/api/metrics", post(api::metrics::receive_metrics))
        // Dashboard stream
        .route("/ws", get(ws::handler))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .with_state(state)
        // CORS middleware (dashboards are served from other origins)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
