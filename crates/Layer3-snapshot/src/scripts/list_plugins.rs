use crate::pagination::drain_pages;
use plugscope_foundation::{Error, Result};
use plugscope_gateway::{PluginResource, ResourceGateway};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// One plugin of a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedPlugin {
    pub sid: String,
    pub name: String,
    pub friendly_name: String,
    pub description: String,
    /// Installed in the configuration of the active release
    pub is_active: bool,
    pub date_created: String,
    pub date_updated: String,
}

impl From<PluginResource> for ListedPlugin {
    fn from(plugin: PluginResource) -> Self {
        Self {
            sid: plugin.sid,
            name: plugin.unique_name,
            friendly_name: plugin.friendly_name,
            description: plugin.description,
            is_active: false,
            date_created: plugin.date_created,
            date_updated: plugin.date_updated,
        }
    }
}

/// One page of plugins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginListing {
    pub plugins: Vec<ListedPlugin>,
    pub next_page_token: Option<String>,
}

/// List one page of plugins, flagging those installed by the active release
pub async fn list_plugins(gateway: Arc<dyn ResourceGateway>, page_token: Option<&str>) -> Result<PluginListing> {
    let (page, release) = futures::try_join!(
        gateway.list_plugins(page_token),
        gateway.get_active_release(),
    )?;

    let mut plugins: Vec<ListedPlugin> = page.items.into_iter().map(ListedPlugin::from).collect();

    if let Some(release) = release.filter(|_| !plugins.is_empty()) {
        let configuration_sid = release.configuration_sid.as_str();
        let gw = gateway.as_ref();
        let installed = drain_pages(move |token: Option<String>| async move {
            gw.list_configured_plugins(configuration_sid, token.as_deref()).await
        })
        .await
        .map_err(Error::from)?;

        let installed: HashSet<&str> = installed.iter().map(|link| link.plugin_sid.as_str()).collect();
        for plugin in &mut plugins {
            plugin.is_active = installed.contains(plugin.sid.as_str());
        }
        debug!(
            "Active release {} installs {} of {} listed plugins",
            release.sid,
            plugins.iter().filter(|p| p.is_active).count(),
            plugins.len()
        );
    }

    Ok(PluginListing {
        plugins,
        next_page_token: page.next_page_token,
    })
}
