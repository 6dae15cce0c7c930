use crate::diff::{compute_diff, DiffResult};
use crate::snapshot::SnapshotAggregator;
use plugscope_foundation::{Error, Result};
use plugscope_gateway::ResourceGateway;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Resource kinds that can be diffed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceKind {
    #[default]
    Configuration,
}

impl ResourceKind {
    pub const ALL: &'static [ResourceKind] = &[ResourceKind::Configuration];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Configuration => "configuration",
        }
    }

    fn unsupported() -> Error {
        let names: Vec<_> = Self::ALL.iter().map(|k| k.as_str()).collect();
        Error::validation(format!("resource must be one of: {}", names.join(", ")))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(Self::unsupported)
    }
}

/// Input of [`diff_script`]
///
/// `resource` is kept as the caller's raw string; it is parsed before any
/// remote call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    pub resource: String,
    pub old_identifier: String,
    pub new_identifier: String,
}

impl DiffOptions {
    pub fn configurations(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            resource: ResourceKind::Configuration.as_str().to_string(),
            old_identifier: old.into(),
            new_identifier: new.into(),
        }
    }
}

/// Diff two resources identified by sid or `"active"`
///
/// The two snapshots are aggregated concurrently and independently; the first
/// failure of either side fails the diff.
pub async fn diff_script(gateway: Arc<dyn ResourceGateway>, options: DiffOptions) -> Result<DiffResult> {
    let resource: ResourceKind = options.resource.parse()?;
    let aggregator = SnapshotAggregator::new(gateway);

    match resource {
        ResourceKind::Configuration => {
            let (old, new) = futures::try_join!(
                aggregator.resolve_snapshot(&options.old_identifier),
                aggregator.resolve_snapshot(&options.new_identifier),
            )?;

            let diff = compute_diff(&old, &new);
            info!(
                "Diffed configuration {} against {}: {} configuration changes, +{} -{} ~{} plugins",
                old.sid,
                new.sid,
                diff.configuration.len(),
                diff.plugins.added.len(),
                diff.plugins.removed.len(),
                diff.plugins.changed.len()
            );
            Ok(diff)
        }
    }
}
