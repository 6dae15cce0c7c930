//! # plugscope-snapshot
//!
//! Configuration snapshots and structural diffs for the Flex Plugin Service.
//!
//! ## Flow
//!
//! ```text
//! identifier ("FJ..." | "active")
//!        │
//!        ▼
//! SnapshotAggregator ── drain_pages ──► ResourceGateway
//!        │   (plugin + version lookups run concurrently)
//!        ▼
//! ConfigurationSnapshot ×2 ──► compute_diff ──► DiffResult
//! ```
//!
//! Snapshots and diffs are plain values built per call; nothing is cached.

pub mod diff;
pub mod pagination;
pub mod render;
pub mod scripts;
pub mod snapshot;
pub mod toolkit;

// Core types
pub use diff::{compute_diff, ChangedPlugin, DiffField, DiffResult, FieldChange, PluginChanges};
pub use pagination::drain_pages;
pub use snapshot::{ConfigurationSnapshot, PluginEntry, SnapshotAggregator, ACTIVE_IDENTIFIER};

// Scripts
pub use scripts::{
    describe_configuration, diff_script, list_configurations, list_plugins, ConfigurationListing,
    DescribedConfiguration, DiffOptions, ListedConfiguration, ListedPlugin, PluginListing,
    ResourceKind,
};
pub use toolkit::Toolkit;

// Rendering
pub use render::{render_configuration_listing, render_diff, render_plugin_listing, render_snapshot};
