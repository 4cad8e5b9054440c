//! API error taxonomy

use thiserror::Error;

/// Failure of a backend API call.
///
/// `Connection` and `Timeout` are retryable transport failures; the session
/// layer surfaces them as a connection error without changing phase.
/// `Server` carries the backend's `detail` message verbatim for display
/// where it aids action.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("request timed out")]
    Timeout,
    #[error("{detail}")]
    Server { status: u16, detail: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether a retry may help (transport-level failure).
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Connection(_) | ApiError::Timeout)
    }

    /// The backend's `detail` message, when there is one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Connection(e.to_string())
        }
    }
}
