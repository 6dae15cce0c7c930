//! Gateway-specific error types
//!
//! GatewayError는 Plugin Service 호출 관련 세부 에러를 관리합니다.
//! plugscope_foundation::Error와의 변환을 지원합니다.

use crate::retry::{RetryDecision, RetryableError};
use std::time::Duration;
use plugscope_foundation::Error as FoundationError;
use thiserror::Error;

/// Errors that can occur while talking to the Plugin Service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Resource does not exist (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Credentials are missing or invalid
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded{}", .retry_after_ms.map(|ms| format!(", retry after {}ms", ms)).unwrap_or_default())]
    RateLimited { retry_after_ms: Option<u64> },

    /// Server error (5xx)
    #[error("Server error: {0}")]
    ServerError(String),

    /// Network error (connection failed, DNS, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// Request failed (timeout, aborted body, etc.)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Unknown error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl RetryableError for GatewayError {
    fn retry_decision(&self) -> RetryDecision {
        match self {
            GatewayError::RateLimited {
                retry_after_ms: Some(ms),
            } => RetryDecision::WaitFor(Duration::from_millis(*ms)),

            GatewayError::RateLimited { retry_after_ms: None }
            | GatewayError::ServerError(_)
            | GatewayError::Network(_)
            | GatewayError::RequestFailed(_) => RetryDecision::Backoff,

            GatewayError::NotFound(_)
            | GatewayError::Authentication(_)
            | GatewayError::InvalidResponse(_)
            | GatewayError::Unknown(_) => RetryDecision::Fail,
        }
    }
}

impl GatewayError {
    /// Create from HTTP status code and body
    pub fn from_http_status(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| body.to_string());
        match status {
            401 | 403 => GatewayError::Authentication(message),
            404 => GatewayError::NotFound(message),
            429 => GatewayError::RateLimited {
                retry_after_ms: extract_retry_after(body),
            },
            500..=599 => GatewayError::ServerError(message),
            _ => GatewayError::Unknown(format!("HTTP {}: {}", status, message)),
        }
    }

    /// Map a reqwest transport failure
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::RequestFailed(format!("timed out: {}", err))
        } else if err.is_connect() {
            GatewayError::Network(err.to_string())
        } else if err.is_decode() {
            GatewayError::InvalidResponse(err.to_string())
        } else {
            GatewayError::RequestFailed(err.to_string())
        }
    }
}

/// Pull `message` out of a Plugin Service error body
/// (`{"code": 20404, "message": "...", "more_info": "...", "status": 404}`)
fn extract_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
    let message = json.get("message")?.as_str()?;
    match json.get("code").and_then(|c| c.as_u64()) {
        Some(code) => Some(format!("{} (code {})", message, code)),
        None => Some(message.to_string()),
    }
}

/// Try to extract a retry-after hint (seconds) from an error body, in milliseconds
fn extract_retry_after(body: &str) -> Option<u64> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
    let secs = json.get("retry_after").and_then(|v| v.as_f64())?;
    Some((secs * 1000.0) as u64)
}

// ============================================================================
// plugscope_foundation::Error 변환
// ============================================================================

impl From<GatewayError> for FoundationError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound(msg) => FoundationError::NotFound(msg),
            other => FoundationError::Transport(other.to_string()),
        }
    }
}
