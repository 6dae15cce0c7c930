//! Resolved configuration snapshot types.

use serde::{Deserialize, Serialize};

/// A fully-resolved view of one configuration
///
/// `plugins` is in configured-plugin listing order (phase, then service order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSnapshot {
    pub sid: String,
    pub version: String,
    pub description: Option<String>,
    pub date_created: String,
    pub plugins: Vec<PluginEntry>,
}

impl ConfigurationSnapshot {
    /// Look up a plugin by sid
    pub fn plugin(&self, sid: &str) -> Option<&PluginEntry> {
        self.plugins.iter().find(|p| p.sid == sid)
    }

    pub fn plugin_sids(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|p| p.sid.as_str())
    }
}

/// One installed plugin within a configuration
///
/// Only `version` and `phase` take part in diffs; the rest is display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginEntry {
    pub sid: String,
    pub unique_name: String,
    pub version: String,
    pub phase: u32,
    pub is_private: bool,
    #[serde(default)]
    pub plugin_version_sid: String,
    #[serde(default)]
    pub friendly_name: String,
    #[serde(default)]
    pub plugin_url: String,
}
