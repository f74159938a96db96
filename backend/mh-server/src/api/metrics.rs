//! Agent metrics ingestion
//!
//! Agents POST one record per sample. Accepted records are stamped and pushed
//! to every connected dashboard through the hub.

use crate::{ApiError, ApiResult, AppState};

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

pub const MIN_USAGE_PERCENT: f64 = 0.0;
pub const MAX_USAGE_PERCENT: f64 = 100.0;
pub const RECEIVED_STATUS: &str = "metrics received";

/// One sample as reported by an agent (wire names are the agents')
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    #[serde(rename = "uso_cpu")]
    pub cpu_usage: f64,
    #[serde(rename = "uso_disco")]
    pub disk_usage: f64,
}

impl MetricsReport {
    /// Both readings must be percentages
    #[track_caller]
    pub fn validate(&self) -> ApiResult<()> {
        check_percent("uso_cpu", self.cpu_usage)?;
        check_percent("uso_disco", self.disk_usage)?;
        Ok(())
    }
}

#[track_caller]
fn check_percent(field: &str, value: f64) -> ApiResult<()> {
    // NaN fails the range check too
    if !(MIN_USAGE_PERCENT..=MAX_USAGE_PERCENT).contains(&value) {
        return Err(ApiError::validation(
            field,
            format!("{field} must be between {MIN_USAGE_PERCENT} and {MAX_USAGE_PERCENT}, got {value}"),
        ));
    }
    Ok(())
}

/// What dashboards receive: the report plus the server receive time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsBroadcast {
    #[serde(flatten)]
    pub report: MetricsReport,
    pub received_at: String,
}

impl MetricsBroadcast {
    pub fn new(report: MetricsReport, received_at: DateTime<Utc>) -> Self {
        Self {
            report,
            received_at: received_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn to_payload(&self) -> ApiResult<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub status: String,
}

/// POST /api/metrics
///
/// Validate a report and broadcast it to all dashboards
pub async fn receive_metrics(
    State(state): State<AppState>,
    payload: Result<Json<MetricsReport>, JsonRejection>,
) -> ApiResult<Json<MetricsResponse>> {
    let Json(report) = payload?;
    report.validate()?;

    debug!(
        "Metrics received: cpu={}%, disk={}%",
        report.cpu_usage, report.disk_usage
    );

    let broadcast = MetricsBroadcast::new(report, Utc::now());
    state.hub.broadcast(broadcast.to_payload()?).await;

    Ok(Json(MetricsResponse {
        status: RECEIVED_STATUS.to_string(),
    }))
}
