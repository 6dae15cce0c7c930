//! Plugin Service resource types
//!
//! Field names follow the service's snake_case JSON. Optional and defaulted
//! fields tolerate older payloads that omit them.

use serde::{Deserialize, Serialize};

/// A plugin configuration (`Configurations/{sid}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationResource {
    pub sid: String,
    #[serde(default)]
    pub account_sid: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date_created: String,
}

/// Link between a configuration and one plugin version
/// (`Configurations/{sid}/Plugins`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredPluginResource {
    pub plugin_sid: String,
    pub plugin_version_sid: String,
    #[serde(default)]
    pub configuration_sid: String,
    #[serde(default)]
    pub unique_name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub plugin_url: String,
    pub phase: u32,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub date_created: String,
}

/// A plugin (`Plugins/{sid}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginResource {
    pub sid: String,
    #[serde(default)]
    pub account_sid: String,
    pub unique_name: String,
    #[serde(default)]
    pub friendly_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date_created: String,
    #[serde(default)]
    pub date_updated: String,
}

/// A published plugin version (`Plugins/{sid}/Versions/{vsid}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginVersionResource {
    pub sid: String,
    #[serde(default)]
    pub plugin_sid: String,
    pub version: String,
    #[serde(default)]
    pub plugin_url: String,
    #[serde(default)]
    pub changelog: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub date_created: String,
}

/// A release binding one configuration as active (`Releases/Active`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseResource {
    pub sid: String,
    #[serde(default)]
    pub account_sid: String,
    pub configuration_sid: String,
    #[serde(default)]
    pub date_created: String,
}

/// One page of a paginated collection
///
/// `next_page_token` is opaque to callers; `None` means this is the last page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }

    /// A page with no successor
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    pub fn is_last(&self) -> bool {
        self.next_page_token.is_none()
    }
}
