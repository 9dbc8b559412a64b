//! Error types for gridcal.

use std::fmt;

use thiserror::Error;

/// Best-effort classification of why a backend call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCause {
    /// The backend refused the operation (row-level security, 403).
    Permission,
    /// Missing or invalid credentials (401).
    Authentication,
    /// The backend could not be reached.
    Network,
    Other,
}

impl RemoteCause {
    /// Classify an HTTP status code returned by the backend.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => RemoteCause::Authentication,
            403 => RemoteCause::Permission,
            _ => RemoteCause::Other,
        }
    }

    /// Human-readable hint shown to the user alongside the raw message.
    pub fn hint(&self) -> &'static str {
        match self {
            RemoteCause::Permission => "The backend denied permission for this operation.",
            RemoteCause::Authentication => "The backend rejected the configured API key.",
            RemoteCause::Network => "Could not reach the backend. Check your connection.",
            RemoteCause::Other => "The backend returned an unexpected error.",
        }
    }
}

impl fmt::Display for RemoteCause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            RemoteCause::Permission => "permission denied",
            RemoteCause::Authentication => "authentication failed",
            RemoteCause::Network => "network error",
            RemoteCause::Other => "backend error",
        };
        write!(f, "{}", label)
    }
}

/// Errors that can occur in gridcal operations.
#[derive(Error, Debug)]
pub enum GridcalError {
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Backend {cause}: {message}")]
    Remote { cause: RemoteCause, message: String },

    #[error("No backend configured")]
    NoBackendConfigured,

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Team member not found: {0}")]
    TeamMemberNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GridcalError {
    pub fn remote(cause: RemoteCause, message: impl Into<String>) -> Self {
        GridcalError::Remote {
            cause,
            message: message.into(),
        }
    }

    /// Description suitable for a user-facing notification.
    pub fn describe(&self) -> String {
        match self {
            GridcalError::Remote { cause, message } => format!("{} ({})", cause.hint(), message),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for GridcalError {
    fn from(e: serde_json::Error) -> Self {
        GridcalError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for GridcalError {
    fn from(e: reqwest::Error) -> Self {
        let cause = if e.is_connect() || e.is_timeout() || e.is_request() {
            RemoteCause::Network
        } else if let Some(status) = e.status() {
            RemoteCause::from_status(status.as_u16())
        } else {
            RemoteCause::Other
        };
        GridcalError::remote(cause, e.to_string())
    }
}

/// Result type alias for gridcal operations.
pub type GridcalResult<T> = Result<T, GridcalError>;
