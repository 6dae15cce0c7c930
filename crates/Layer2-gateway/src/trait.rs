//! ResourceGateway trait
//!
//! One method per remote operation the snapshot layer consumes. Every call is
//! an await point; implementations own transport concerns (auth, retries,
//! timeouts) and report failures as [`GatewayError`].

use crate::error::GatewayError;
use crate::resource::{
    ConfigurationResource, ConfiguredPluginResource, Page, PluginResource,
    PluginVersionResource, ReleaseResource,
};
use async_trait::async_trait;

/// Plugin Service resource gateway
///
/// Implement this trait to add a new backend (HTTP, in-memory, recorded).
#[async_trait]
pub trait ResourceGateway: Send + Sync {
    /// Fetch a configuration by sid
    async fn get_configuration(&self, sid: &str) -> Result<ConfigurationResource, GatewayError>;

    /// Fetch one page of the plugins configured in a configuration
    ///
    /// `page_token` is `None` for the first page, otherwise the token returned
    /// by the previous page.
    async fn list_configured_plugins(
        &self,
        configuration_sid: &str,
        page_token: Option<&str>,
    ) -> Result<Page<ConfiguredPluginResource>, GatewayError>;

    /// Fetch a plugin by sid
    async fn get_plugin(&self, plugin_sid: &str) -> Result<PluginResource, GatewayError>;

    /// Fetch one version of a plugin
    async fn get_plugin_version(
        &self,
        plugin_sid: &str,
        version_sid: &str,
    ) -> Result<PluginVersionResource, GatewayError>;

    /// Fetch the active release, `None` when no release is active
    async fn get_active_release(&self) -> Result<Option<ReleaseResource>, GatewayError>;

    /// Fetch one page of all configurations on the account
    async fn list_configurations(
        &self,
        page_token: Option<&str>,
    ) -> Result<Page<ConfigurationResource>, GatewayError>;

    /// Fetch one page of all plugins on the account
    async fn list_plugins(
        &self,
        page_token: Option<&str>,
    ) -> Result<Page<PluginResource>, GatewayError>;
}
