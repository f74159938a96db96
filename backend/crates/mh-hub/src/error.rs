use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures local to a single client. They end that client's loops and
/// never reach the hub or any other client.
#[derive(Error, Debug)]
pub enum HubError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Transport error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl HubError {
    #[track_caller]
    pub fn connection_closed(reason: impl Into<String>) -> Self {
        Self::ConnectionClosed {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Short label used for metrics
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ConnectionClosed { .. } => "connection_closed",
            Self::Transport { .. } => "transport",
            Self::Internal { .. } => "internal",
        }
    }
}

impl From<axum::Error> for HubError {
    #[track_caller]
    fn from(source: axum::Error) -> Self {
        Self::Transport {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<tokio::task::JoinError> for HubError {
    #[track_caller]
    fn from(source: tokio::task::JoinError) -> Self {
        Self::Internal {
            message: format!("client task failed: {source}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, HubError>;
