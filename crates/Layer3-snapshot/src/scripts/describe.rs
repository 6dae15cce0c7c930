use crate::snapshot::{ConfigurationSnapshot, SnapshotAggregator, ACTIVE_IDENTIFIER};
use plugscope_foundation::{Error, Result};
use plugscope_gateway::ResourceGateway;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A resolved configuration plus whether it is the one currently released
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribedConfiguration {
    #[serde(flatten)]
    pub snapshot: ConfigurationSnapshot,
    pub is_active: bool,
}

/// Resolve one configuration by sid or `"active"`
///
/// For a sid, the snapshot and the release lookup run concurrently. A missing
/// release only clears `is_active`. For `"active"` the release is read once,
/// while resolving, and the result is active by construction.
pub async fn describe_configuration(
    gateway: Arc<dyn ResourceGateway>,
    identifier: &str,
) -> Result<DescribedConfiguration> {
    let aggregator = SnapshotAggregator::new(gateway.clone());

    if identifier == ACTIVE_IDENTIFIER {
        let snapshot = aggregator.resolve_snapshot(identifier).await?;
        return Ok(DescribedConfiguration {
            snapshot,
            is_active: true,
        });
    }

    let (snapshot, release) = futures::try_join!(aggregator.resolve_snapshot(identifier), async {
        gateway.get_active_release().await.map_err(Error::from)
    })?;

    let is_active = release.is_some_and(|r| r.configuration_sid == snapshot.sid);
    Ok(DescribedConfiguration { snapshot, is_active })
}
