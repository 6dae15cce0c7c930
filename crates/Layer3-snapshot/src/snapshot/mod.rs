//! Configuration snapshots.
//!
//! [`SnapshotAggregator`] stitches a configuration, its configured-plugin
//! links and the per-plugin name/version lookups into one
//! [`ConfigurationSnapshot`] that needs no further remote calls.

mod aggregator;
mod model;

pub use aggregator::{SnapshotAggregator, ACTIVE_IDENTIFIER};
pub use model::{ConfigurationSnapshot, PluginEntry};
