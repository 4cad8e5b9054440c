//! Response types for the gateway request/response pattern

use serde::{Deserialize, Serialize};

/// Error classification codes returned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Unauthorized,
    InvalidInput,
    Conflict,
    InternalError,
    /// Unknown code for forward compatibility
    #[serde(other)]
    Unknown,
}

/// Result of a request operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResponseResult {
    /// Operation succeeded
    Success {
        /// Optional data payload (varies by request type)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },
    /// Operation failed
    Error {
        /// Error classification code
        code: ErrorCode,
        /// Human-readable error message
        message: String,
    },
    /// Unknown response type for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ResponseResult {
    /// Create a success response with data
    pub fn success<T: Serialize>(data: T) -> Self {
        ResponseResult::Success {
            data: serde_json::to_value(data).ok(),
        }
    }

    /// Create a success response without data
    pub fn success_empty() -> Self {
        ResponseResult::Success { data: None }
    }

    /// Create an error response
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ResponseResult::Error {
            code,
            message: message.into(),
        }
    }

    /// Check if this is a success response
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseResult::Success { .. })
    }
}

/// Client-side request failure.
///
/// `Cancelled` is the at-most-once signal: the connection dropped between
/// send and acknowledgment, so the caller must not assume the server-side
/// effect occurred.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("request was cancelled before a response arrived")]
    Cancelled,
    #[error("request timed out")]
    Timeout,
    #[error("failed to send request: {0}")]
    SendFailed(String),
    #[error("not connected to the gateway")]
    NotConnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_result_deserializes_with_code() {
        let raw = r#"{"status":"error","code":"not_found","message":"world not found"}"#;
        let result: ResponseResult = serde_json::from_str(raw).expect("deserialize");
        match result {
            ResponseResult::Error { code, message } => {
                assert_eq!(code, ErrorCode::NotFound);
                assert_eq!(message, "world not found");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let raw = r#"{"status":"deferred"}"#;
        let result: ResponseResult = serde_json::from_str(raw).expect("deserialize");
        assert!(matches!(result, ResponseResult::Unknown));
    }

    #[test]
    fn results_compare_by_value() {
        let a = ResponseResult::success(serde_json::json!({"ok": true}));
        let b = ResponseResult::success(serde_json::json!({"ok": true}));
        assert_eq!(a, b);
        assert_ne!(a, ResponseResult::success_empty());
    }

    #[test]
    fn unknown_error_code_is_tolerated() {
        let raw = r#"{"status":"error","code":"rate_limited","message":"slow down"}"#;
        let result: ResponseResult = serde_json::from_str(raw).expect("deserialize");
        match result {
            ResponseResult::Error { code, .. } => assert_eq!(code, ErrorCode::Unknown),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
