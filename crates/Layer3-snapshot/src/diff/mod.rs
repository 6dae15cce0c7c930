//! Structural diff between two configuration snapshots.

mod engine;
mod model;

pub use engine::compute_diff;
pub use model::{ChangedPlugin, DiffField, DiffResult, FieldChange, PluginChanges};
