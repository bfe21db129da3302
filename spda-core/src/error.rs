//! Error types for the SPDA client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the events backend.
#[derive(Error, Debug)]
pub enum SpdaError {
    /// The backend answered with a non-2xx status.
    #[error("Request failed with status {0}")]
    Status(StatusCode),

    /// No response was received at all.
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected response shape: {0}")]
    Decode(String),

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpdaError {
    /// Both a bad status and a transport failure count as a failed fetch.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, SpdaError::Status(_) | SpdaError::Transport(_))
    }

    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SpdaError::Status(status) => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SpdaError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            SpdaError::Status(status)
        } else if err.is_decode() {
            SpdaError::Decode(err.to_string())
        } else {
            SpdaError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SpdaError {
    fn from(err: serde_json::Error) -> Self {
        SpdaError::Decode(err.to_string())
    }
}

/// Result type alias for SPDA operations.
pub type SpdaResult<T> = Result<T, SpdaError>;
