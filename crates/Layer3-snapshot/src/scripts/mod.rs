//! Orchestration scripts
//!
//! Each script is one host-facing operation built from the snapshot core:
//!
//! - [`diff_script`]: validate the resource kind, resolve two snapshots
//!   concurrently, diff them
//! - [`describe_configuration`]: resolve one snapshot and flag whether it is
//!   the active one
//! - [`list_plugins`]: one page of plugins with an active flag
//! - [`list_configurations`]: one page of configurations with an active flag

mod describe;
mod diff;
mod list_configurations;
mod list_plugins;

pub use describe::{describe_configuration, DescribedConfiguration};
pub use diff::{diff_script, DiffOptions, ResourceKind};
pub use list_configurations::{list_configurations, ConfigurationListing, ListedConfiguration};
pub use list_plugins::{list_plugins, ListedPlugin, PluginListing};
