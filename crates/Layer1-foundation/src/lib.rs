//! # plugscope-foundation
//!
//! Foundation layer for PlugScope:
//! - Error: 공통 에러 타입 (NotFound, NoActiveRelease, Validation, Transport)
//! - Config: Plugin Service 접속 설정 (ServiceConfig)
//! - Storage: JsonStore (글로벌/프로젝트 설정 파일)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  CLI (plugscope describe / diff / plugins)              │
//! │                     │                                   │
//! │                     ▼                                   │
//! │   Snapshot Aggregator ──────► Diff Engine               │
//! │                     │                                   │
//! │                     ▼                                   │
//! │   Resource Gateway (HTTP / in-memory)                   │
//! │                     │                                   │
//! │                     ▼                                   │
//! │   ServiceConfig + Error  (this crate)                   │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{ServiceConfig, DEFAULT_BASE_URL, SERVICE_CONFIG_FILE};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::JsonStore;
