use plugscope_foundation::Result;
use plugscope_gateway::{ConfigurationResource, ResourceGateway};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One configuration of a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedConfiguration {
    pub sid: String,
    pub version: String,
    pub description: Option<String>,
    /// Bound to the active release
    pub is_active: bool,
    pub date_created: String,
}

impl ListedConfiguration {
    fn new(configuration: ConfigurationResource, active_sid: Option<&str>) -> Self {
        Self {
            is_active: active_sid == Some(configuration.sid.as_str()),
            sid: configuration.sid,
            version: configuration.version,
            description: configuration.description,
            date_created: configuration.date_created,
        }
    }
}

/// One page of configurations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationListing {
    pub configurations: Vec<ListedConfiguration>,
    pub next_page_token: Option<String>,
}

/// List one page of configurations, flagging the one the active release uses
pub async fn list_configurations(
    gateway: Arc<dyn ResourceGateway>,
    page_token: Option<&str>,
) -> Result<ConfigurationListing> {
    let (page, release) = futures::try_join!(
        gateway.list_configurations(page_token),
        gateway.get_active_release(),
    )?;

    let active_sid = release.as_ref().map(|r| r.configuration_sid.as_str());
    let configurations = page
        .items
        .into_iter()
        .map(|configuration| ListedConfiguration::new(configuration, active_sid))
        .collect();

    Ok(ConfigurationListing {
        configurations,
        next_page_token: page.next_page_token,
    })
}
