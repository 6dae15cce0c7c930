//! Toolkit facade
//!
//! One handle that owns the gateway and exposes every script as a method.

use crate::diff::DiffResult;
use crate::scripts::{
    self, ConfigurationListing, DescribedConfiguration, DiffOptions, PluginListing,
};
use crate::snapshot::{ConfigurationSnapshot, SnapshotAggregator};
use plugscope_foundation::Result;
use plugscope_gateway::ResourceGateway;
use std::sync::Arc;

#[derive(Clone)]
pub struct Toolkit {
    gateway: Arc<dyn ResourceGateway>,
}

impl Toolkit {
    pub fn new(gateway: Arc<dyn ResourceGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<dyn ResourceGateway> {
        &self.gateway
    }

    /// Resolve a bare snapshot without the active flag
    pub async fn snapshot(&self, identifier: &str) -> Result<ConfigurationSnapshot> {
        SnapshotAggregator::new(self.gateway.clone())
            .resolve_snapshot(identifier)
            .await
    }

    pub async fn describe(&self, identifier: &str) -> Result<DescribedConfiguration> {
        scripts::describe_configuration(self.gateway.clone(), identifier).await
    }

    pub async fn diff(&self, options: DiffOptions) -> Result<DiffResult> {
        scripts::diff_script(self.gateway.clone(), options).await
    }

    pub async fn list_configurations(&self, page_token: Option<&str>) -> Result<ConfigurationListing> {
        scripts::list_configurations(self.gateway.clone(), page_token).await
    }

    pub async fn list_plugins(&self, page_token: Option<&str>) -> Result<PluginListing> {
        scripts::list_plugins(self.gateway.clone(), page_token).await
    }
}
