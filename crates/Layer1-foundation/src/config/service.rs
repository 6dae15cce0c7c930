//! Plugin Service 접속 설정
//!
//! 글로벌 → 프로젝트 → 환경변수 → CLI 플래그 순서로 병합된다.

use crate::storage::JsonStore;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 설정 파일명
pub const SERVICE_CONFIG_FILE: &str = "service.json";

/// Plugin Service 기본 URL
pub const DEFAULT_BASE_URL: &str = "https://flex-api.twilio.com/v1/PluginService";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Plugin Service 접속 설정
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// 인증 사용자 (Account SID / API key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// 인증 비밀번호 (Auth token / API secret)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// 요청 타임아웃 (초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// 재시도 횟수
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// 글로벌 + 프로젝트 + 환경변수 병합 로드
    pub fn load() -> Result<Self> {
        let mut config = Self::new();

        // 1. 글로벌 설정 (~/.config/plugscope/service.json)
        if let Ok(global) = JsonStore::global() {
            config.merge_from_store(&global)?;
        }

        // 2. 프로젝트 설정 (.plugscope/service.json)
        if let Ok(project) = JsonStore::current_project() {
            config.merge_from_store(&project)?;
        }

        // 3. 환경변수 오버라이드
        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// 저장소의 설정 파일이 있으면 병합
    pub fn merge_from_store(&mut self, store: &JsonStore) -> Result<()> {
        if let Some(other) = store.load_optional::<ServiceConfig>(SERVICE_CONFIG_FILE)? {
            debug!(
                "Merging service config from {}",
                store.file_path(SERVICE_CONFIG_FILE).display()
            );
            self.merge(other);
        }
        Ok(())
    }

    /// 다른 설정 병합 (other가 우선)
    pub fn merge(&mut self, other: ServiceConfig) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.username.is_some() {
            self.username = other.username;
        }
        if other.password.is_some() {
            self.password = other.password;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.max_retries.is_some() {
            self.max_retries = other.max_retries;
        }
    }

    /// 환경변수 오버라이드
    ///
    /// `lookup` resolves a variable name; `load()` passes `std::env::var`.
    /// Numeric variables that fail to parse are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PLUGSCOPE_BASE_URL") {
            self.base_url = Some(url);
        }
        if let Some(username) = lookup("PLUGSCOPE_USERNAME") {
            self.username = Some(username);
        }
        if let Some(password) = lookup("PLUGSCOPE_PASSWORD") {
            self.password = Some(password);
        }
        if let Some(secs) = lookup("PLUGSCOPE_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.timeout_secs = Some(secs);
        }
        if let Some(retries) = lookup("PLUGSCOPE_MAX_RETRIES").and_then(|v| v.parse().ok()) {
            self.max_retries = Some(retries);
        }
    }

    /// 필수 값 확인
    pub fn validate(&self) -> Result<()> {
        if self.username.as_deref().map_or(true, str::is_empty) {
            return Err(Error::Config(
                "Missing username. Set PLUGSCOPE_USERNAME or pass --username.".to_string(),
            ));
        }
        if self.password.as_deref().map_or(true, str::is_empty) {
            return Err(Error::Config(
                "Missing password. Set PLUGSCOPE_PASSWORD or pass --password.".to_string(),
            ));
        }
        Ok(())
    }

    // effective 값들
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn effective_timeout(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn effective_max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }

    // 빌더
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }
}
