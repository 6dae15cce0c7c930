//! In-memory gateway
//!
//! Serves resources from local collections with fixed-size pages. Failures and
//! latency can be injected per operation key:
//!
//! | key | operation |
//! |---|---|
//! | `configuration:{sid}` | `get_configuration` |
//! | `configured_plugins:{configuration_sid}:{page}` | `list_configured_plugins` |
//! | `plugin:{sid}` | `get_plugin` |
//! | `plugin_version:{version_sid}` | `get_plugin_version` |
//! | `active_release` | `get_active_release` |
//! | `configurations:{page}` | `list_configurations` |
//! | `plugins:{page}` | `list_plugins` |
//!
//! `{page}` is the 0-based page index.

use crate::{
    error::GatewayError,
    r#trait::ResourceGateway,
    resource::{
        ConfigurationResource, ConfiguredPluginResource, Page, PluginResource,
        PluginVersionResource, ReleaseResource,
    },
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

const DEFAULT_PAGE_SIZE: usize = 50;
const PAGE_TOKEN_PREFIX: &str = "page-";

#[derive(Debug, Default)]
struct State {
    configurations: Vec<ConfigurationResource>,
    configured_plugins: HashMap<String, Vec<ConfiguredPluginResource>>,
    plugins: Vec<PluginResource>,
    versions: HashMap<String, PluginVersionResource>,
    active_release: Option<ReleaseResource>,
    failures: HashMap<String, GatewayError>,
    latencies: HashMap<String, Duration>,
    calls: Vec<String>,
}

/// Gateway backed by in-memory collections
#[derive(Debug)]
pub struct InMemoryGateway {
    state: RwLock<State>,
    page_size: usize,
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    // ========================================================================
    // Builder
    // ========================================================================

    /// Items per page for every paginated collection (minimum 1)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Add or replace a configuration; listing order is first insertion order
    pub fn with_configuration(mut self, configuration: ConfigurationResource) -> Self {
        let state = self.state.get_mut();
        state
            .configured_plugins
            .entry(configuration.sid.clone())
            .or_default();
        match state
            .configurations
            .iter()
            .position(|c| c.sid == configuration.sid)
        {
            Some(index) => state.configurations[index] = configuration,
            None => state.configurations.push(configuration),
        }
        self
    }

    /// Append a configured plugin link; listing order is insertion order
    pub fn with_configured_plugin(mut self, link: ConfiguredPluginResource) -> Self {
        self.state
            .get_mut()
            .configured_plugins
            .entry(link.configuration_sid.clone())
            .or_default()
            .push(link);
        self
    }

    pub fn with_plugin(mut self, plugin: PluginResource) -> Self {
        self.state.get_mut().plugins.push(plugin);
        self
    }

    pub fn with_plugin_version(mut self, version: PluginVersionResource) -> Self {
        self.state
            .get_mut()
            .versions
            .insert(version.sid.clone(), version);
        self
    }

    pub fn with_active_release(mut self, release: ReleaseResource) -> Self {
        self.state.get_mut().active_release = Some(release);
        self
    }

    /// Make the operation identified by `key` fail with `error`
    pub fn with_failure(mut self, key: impl Into<String>, error: GatewayError) -> Self {
        self.state.get_mut().failures.insert(key.into(), error);
        self
    }

    /// Delay the operation identified by `key`
    pub fn with_latency(mut self, key: impl Into<String>, latency: Duration) -> Self {
        self.state.get_mut().latencies.insert(key.into(), latency);
        self
    }

    // ========================================================================
    // Runtime mutation / inspection
    // ========================================================================

    pub async fn set_active_release(&self, release: Option<ReleaseResource>) {
        self.state.write().await.active_release = release;
    }

    /// Number of calls made for an operation key
    pub async fn call_count(&self, key: &str) -> usize {
        self.state
            .read()
            .await
            .calls
            .iter()
            .filter(|k| k.as_str() == key)
            .count()
    }

    /// All operation keys in call order
    pub async fn calls(&self) -> Vec<String> {
        self.state.read().await.calls.clone()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Record the call, apply injected latency, then surface any injected failure
    async fn enter(&self, key: String) -> Result<(), GatewayError> {
        let (latency, failure) = {
            let mut state = self.state.write().await;
            state.calls.push(key.clone());
            (
                state.latencies.get(&key).copied(),
                state.failures.get(&key).cloned(),
            )
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn page_index(page_token: Option<&str>) -> Result<usize, GatewayError> {
        match page_token {
            None => Ok(0),
            Some(token) => token
                .strip_prefix(PAGE_TOKEN_PREFIX)
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| GatewayError::InvalidResponse(format!("bad page token: {}", token))),
        }
    }

    fn slice_page<T: Clone>(&self, items: &[T], index: usize) -> Page<T> {
        let start = index.saturating_mul(self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        let next = (end < items.len()).then(|| format!("{}{}", PAGE_TOKEN_PREFIX, index + 1));
        Page::new(items[start..end].to_vec(), next)
    }
}

#[async_trait]
impl ResourceGateway for InMemoryGateway {
    async fn get_configuration(&self, sid: &str) -> Result<ConfigurationResource, GatewayError> {
        self.enter(format!("configuration:{}", sid)).await?;
        self.state
            .read()
            .await
            .configurations
            .iter()
            .find(|c| c.sid == sid)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("Configuration {}", sid)))
    }

    async fn list_configured_plugins(
        &self,
        configuration_sid: &str,
        page_token: Option<&str>,
    ) -> Result<Page<ConfiguredPluginResource>, GatewayError> {
        let index = Self::page_index(page_token)?;
        self.enter(format!("configured_plugins:{}:{}", configuration_sid, index))
            .await?;

        let state = self.state.read().await;
        let links = state
            .configured_plugins
            .get(configuration_sid)
            .ok_or_else(|| GatewayError::NotFound(format!("Configuration {}", configuration_sid)))?;
        Ok(self.slice_page(links, index))
    }

    async fn get_plugin(&self, plugin_sid: &str) -> Result<PluginResource, GatewayError> {
        self.enter(format!("plugin:{}", plugin_sid)).await?;
        self.state
            .read()
            .await
            .plugins
            .iter()
            .find(|p| p.sid == plugin_sid)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("Plugin {}", plugin_sid)))
    }

    async fn get_plugin_version(
        &self,
        plugin_sid: &str,
        version_sid: &str,
    ) -> Result<PluginVersionResource, GatewayError> {
        self.enter(format!("plugin_version:{}", version_sid)).await?;
        self.state
            .read()
            .await
            .versions
            .get(version_sid)
            .filter(|v| v.plugin_sid == plugin_sid)
            .cloned()
            .ok_or_else(|| {
                GatewayError::NotFound(format!("Plugin {} version {}", plugin_sid, version_sid))
            })
    }

    async fn get_active_release(&self) -> Result<Option<ReleaseResource>, GatewayError> {
        self.enter("active_release".to_string()).await?;
        Ok(self.state.read().await.active_release.clone())
    }

    async fn list_configurations(
        &self,
        page_token: Option<&str>,
    ) -> Result<Page<ConfigurationResource>, GatewayError> {
        let index = Self::page_index(page_token)?;
        self.enter(format!("configurations:{}", index)).await?;
        let state = self.state.read().await;
        Ok(self.slice_page(&state.configurations, index))
    }

    async fn list_plugins(
        &self,
        page_token: Option<&str>,
    ) -> Result<Page<PluginResource>, GatewayError> {
        let index = Self::page_index(page_token)?;
        self.enter(format!("plugins:{}", index)).await?;
        let state = self.state.read().await;
        Ok(self.slice_page(&state.plugins, index))
    }
}
