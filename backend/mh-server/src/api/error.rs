//! REST API error types
//!
//! Every error renders as `{"error": <message>, "code": <CODE>}` so agents
//! can keep matching on the `error` field.

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

pub const INVALID_JSON_MESSAGE: &str = "invalid json";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error code (e.g., "INVALID_JSON", "VALIDATION_ERROR")
    pub code: &'static str,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body was not a JSON metrics record (400)
    #[error("Invalid JSON body: {detail} {location}")]
    InvalidJson {
        detail: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidJson { .. } => {
                log::warn!("{}", self);
                (
                    StatusCode::BAD_REQUEST,
                    ApiErrorResponse {
                        error: INVALID_JSON_MESSAGE.to_string(),
                        code: "INVALID_JSON",
                        field: None,
                    },
                )
            }
            ApiError::Validation { message, field, .. } => {
                log::warn!("Rejected metrics: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ApiErrorResponse {
                        error: message,
                        code: "VALIDATION_ERROR",
                        field,
                    },
                )
            }
            ApiError::Internal { .. } => {
                log::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse {
                        error: "internal error".to_string(),
                        code: "INTERNAL_ERROR",
                        field: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Malformed bodies, wrong content types and type mismatches all read as invalid JSON
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(e: JsonRejection) -> Self {
        ApiError::InvalidJson {
            detail: e.body_text(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(e: serde_json::Error) -> Self {
        ApiError::Internal {
            message: format!("Failed to encode broadcast: {e}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
