//! Config - Plugin Service 접속 설정
//!
//! - `service.rs` - ServiceConfig (base URL, 인증 정보, 타임아웃, 재시도)

mod service;

pub use service::{ServiceConfig, DEFAULT_BASE_URL, SERVICE_CONFIG_FILE};
