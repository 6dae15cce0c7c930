//! Snapshot aggregation across the configuration, configured-plugin, plugin
//! and plugin-version collections.

use super::model::{ConfigurationSnapshot, PluginEntry};
use crate::pagination::drain_pages;
use futures::future::try_join_all;
use plugscope_foundation::{Error, Result};
use plugscope_gateway::{ConfiguredPluginResource, ResourceGateway};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Identifier that stands for the configuration bound to the active release
pub const ACTIVE_IDENTIFIER: &str = "active";

/// Builds [`ConfigurationSnapshot`]s from a [`ResourceGateway`]
///
/// Stateless apart from the gateway handle: every call re-reads the service,
/// including the active release.
#[derive(Clone)]
pub struct SnapshotAggregator {
    gateway: Arc<dyn ResourceGateway>,
}

impl SnapshotAggregator {
    pub fn new(gateway: Arc<dyn ResourceGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<dyn ResourceGateway> {
        &self.gateway
    }

    /// Map an identifier to a concrete configuration sid
    ///
    /// `"active"` is looked up through the release collection on every call.
    /// Only the exact sentinel matches; any other value is passed through as a sid.
    pub async fn resolve_identifier(&self, identifier: &str) -> Result<String> {
        if identifier.trim().is_empty() {
            return Err(Error::validation("configuration identifier must not be empty"));
        }
        if identifier != ACTIVE_IDENTIFIER {
            return Ok(identifier.to_string());
        }

        let release = self
            .gateway
            .get_active_release()
            .await?
            .ok_or(Error::NoActiveRelease)?;
        debug!(
            "Active release {} is bound to configuration {}",
            release.sid, release.configuration_sid
        );
        Ok(release.configuration_sid)
    }

    /// Resolve a configuration sid (or `"active"`) into a full snapshot
    ///
    /// Fails fast: any lookup failure fails the whole snapshot.
    pub async fn resolve_snapshot(&self, identifier: &str) -> Result<ConfigurationSnapshot> {
        let sid = self.resolve_identifier(identifier).await?;

        let configuration = self.gateway.get_configuration(&sid).await?;
        let links = self.configured_plugins(&sid).await?;
        let plugins = self.resolve_plugins(&sid, &links).await?;

        info!(
            "Resolved configuration {} (version {}) with {} plugins",
            configuration.sid,
            configuration.version,
            plugins.len()
        );

        Ok(ConfigurationSnapshot {
            sid: configuration.sid,
            version: configuration.version,
            description: configuration.description,
            date_created: configuration.date_created,
            plugins,
        })
    }

    /// Every configured-plugin link of a configuration, in listing order
    async fn configured_plugins(&self, configuration_sid: &str) -> Result<Vec<ConfiguredPluginResource>> {
        let gateway = self.gateway.as_ref();
        let links = drain_pages(move |token: Option<String>| async move {
            gateway
                .list_configured_plugins(configuration_sid, token.as_deref())
                .await
        })
        .await?;
        Ok(links)
    }

    /// Resolve all links concurrently, then project the sid-keyed results back
    /// into listing order.
    async fn resolve_plugins(
        &self,
        configuration_sid: &str,
        links: &[ConfiguredPluginResource],
    ) -> Result<Vec<PluginEntry>> {
        let mut seen = HashSet::with_capacity(links.len());
        for link in links {
            if !seen.insert(link.plugin_sid.as_str()) {
                return Err(Error::validation(format!(
                    "configuration {} lists plugin {} more than once",
                    configuration_sid, link.plugin_sid
                )));
            }
            if link.phase == 0 {
                return Err(Error::validation(format!(
                    "configuration {} installs plugin {} in phase 0; phases start at 1",
                    configuration_sid, link.plugin_sid
                )));
            }
        }

        let resolved = try_join_all(links.iter().map(|link| self.resolve_plugin(link))).await?;
        let mut arena: HashMap<String, PluginEntry> = resolved
            .into_iter()
            .map(|entry| (entry.sid.clone(), entry))
            .collect();

        links
            .iter()
            .map(|link| {
                arena.remove(&link.plugin_sid).ok_or_else(|| {
                    Error::Internal(format!("plugin {} was not resolved", link.plugin_sid))
                })
            })
            .collect()
    }

    async fn resolve_plugin(&self, link: &ConfiguredPluginResource) -> Result<PluginEntry> {
        let (plugin, version) = futures::try_join!(
            self.gateway.get_plugin(&link.plugin_sid),
            self.gateway
                .get_plugin_version(&link.plugin_sid, &link.plugin_version_sid),
        )?;

        Ok(PluginEntry {
            sid: link.plugin_sid.clone(),
            unique_name: plugin.unique_name,
            version: version.version,
            phase: link.phase,
            is_private: link.private,
            plugin_version_sid: version.sid,
            friendly_name: plugin.friendly_name,
            plugin_url: version.plugin_url,
        })
    }
}
