//! Error types for PlugScope
//!
//! 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// PlugScope 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 리소스 해석 관련
    // ========================================================================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("no active release found")]
    NoActiveRelease,

    #[error("Validation error: {0}")]
    Validation(String),

    // ========================================================================
    // Resource Gateway 관련 (network, auth, rate-limit)
    // ========================================================================
    #[error("Transport error: {0}")]
    Transport(String),

    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 사용자에게 그대로 보여줄 수 있는 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::NoActiveRelease | Error::Validation(_) | Error::Config(_)
        )
    }

    /// Stable, machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "not_found",
            Error::NoActiveRelease => "no_active_release",
            Error::Validation(_) => "validation",
            Error::Transport(_) => "transport",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Internal(_) => "internal",
        }
    }

    /// Validation 에러 생성 헬퍼
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_active_release_message() {
        assert_eq!(Error::NoActiveRelease.to_string(), "no active release found");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Error::NotFound("FJ1".into()).kind(), "not_found");
        assert_eq!(Error::Transport("timeout".into()).kind(), "transport");
        assert_eq!(Error::validation("bad").kind(), "validation");
    }

    #[test]
    fn test_user_facing() {
        assert!(Error::NoActiveRelease.is_user_facing());
        assert!(Error::validation("resource must be one of: configuration").is_user_facing());
        assert!(!Error::Transport("connection reset".into()).is_user_facing());
        assert!(!Error::Internal("bug".into()).is_user_facing());
    }
}
