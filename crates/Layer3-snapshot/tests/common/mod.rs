//! Shared fixtures for the snapshot integration tests
//!
//! 테스트용 Plugin Service 상태를 구성하는 빌더

#![allow(dead_code)]

use plugscope_gateway::{
    ConfigurationResource, ConfiguredPluginResource, InMemoryGateway, PluginResource,
    PluginVersionResource, ReleaseResource, ResourceGateway,
};
use std::collections::HashSet;
use std::sync::Arc;

/// `(plugin sid, version, phase)`
pub type Install<'a> = (&'a str, &'a str, u32);

/// Builds an [`InMemoryGateway`] from configuration descriptions
pub struct Fixture {
    gateway: InMemoryGateway,
    plugins: HashSet<String>,
    versions: HashSet<String>,
}

impl Fixture {
    pub fn new(page_size: usize) -> Self {
        Self {
            gateway: InMemoryGateway::new().with_page_size(page_size),
            plugins: HashSet::new(),
            versions: HashSet::new(),
        }
    }

    /// Add a configuration installing `installs` in listing order
    pub fn configuration(mut self, sid: &str, description: Option<&str>, installs: &[Install<'_>]) -> Self {
        self.gateway = self.gateway.with_configuration(ConfigurationResource {
            sid: sid.into(),
            account_sid: "AC1".into(),
            version: "1.0.0".into(),
            description: description.map(String::from),
            date_created: "2020-09-01T00:00:00Z".into(),
        });

        for (plugin_sid, version, phase) in installs {
            self = self.plugin(plugin_sid);
            let version_sid = version_sid(plugin_sid, version);
            if self.versions.insert(version_sid.clone()) {
                self.gateway = self.gateway.with_plugin_version(PluginVersionResource {
                    sid: version_sid.clone(),
                    plugin_sid: plugin_sid.to_string(),
                    version: version.to_string(),
                    plugin_url: format!("https://assets.example.com/{}/{}/bundle.js", plugin_sid, version),
                    changelog: String::new(),
                    private: false,
                    date_created: String::new(),
                });
            }
            self.gateway = self.gateway.with_configured_plugin(ConfiguredPluginResource {
                plugin_sid: plugin_sid.to_string(),
                plugin_version_sid: version_sid,
                configuration_sid: sid.into(),
                unique_name: String::new(),
                version: String::new(),
                plugin_url: String::new(),
                phase: *phase,
                private: false,
                date_created: String::new(),
            });
        }
        self
    }

    /// Register a plugin without installing it anywhere
    pub fn plugin(mut self, plugin_sid: &str) -> Self {
        if self.plugins.insert(plugin_sid.to_string()) {
            self.gateway = self.gateway.with_plugin(PluginResource {
                sid: plugin_sid.to_string(),
                account_sid: "AC1".into(),
                unique_name: unique_name(plugin_sid),
                friendly_name: format!("Plugin {}", plugin_sid),
                description: String::new(),
                date_created: "2020-08-01T00:00:00Z".into(),
                date_updated: "2020-08-02T00:00:00Z".into(),
            });
        }
        self
    }

    pub fn active(mut self, configuration_sid: &str) -> Self {
        self.gateway = self.gateway.with_active_release(ReleaseResource {
            sid: "FK1".into(),
            account_sid: "AC1".into(),
            configuration_sid: configuration_sid.into(),
            date_created: String::new(),
        });
        self
    }

    /// Apply raw gateway builders (failures, latency)
    pub fn with(mut self, f: impl FnOnce(InMemoryGateway) -> InMemoryGateway) -> Self {
        self.gateway = f(self.gateway);
        self
    }

    /// The concrete gateway for call inspection plus its trait-object handle
    pub fn build(self) -> (Arc<InMemoryGateway>, Arc<dyn ResourceGateway>) {
        let gateway = Arc::new(self.gateway);
        let handle: Arc<dyn ResourceGateway> = gateway.clone();
        (gateway, handle)
    }
}

pub fn unique_name(plugin_sid: &str) -> String {
    format!("plugin-{}", plugin_sid.to_lowercase())
}

pub fn version_sid(plugin_sid: &str, version: &str) -> String {
    format!("FV-{}-{}", plugin_sid, version)
}
