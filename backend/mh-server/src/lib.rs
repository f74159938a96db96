pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod ws;

#[cfg(test)]
mod tests;

pub use api::{
    error::{ApiError, ApiErrorResponse, Result as ApiResult},
    metrics::{MetricsBroadcast, MetricsReport, MetricsResponse, receive_metrics},
};
pub use app_state::AppState;
pub use error::{Result as ServerResult, ServerError};

pub use crate::routes::build_router;
