//! Diff output types.
//!
//! Every collection is always present (possibly empty) so callers can process
//! results uniformly. Field names serialize in camelCase.

use crate::snapshot::PluginEntry;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A diffable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiffField {
    Version,
    Description,
    DateCreated,
    Phase,
}

impl DiffField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffField::Version => "version",
            DiffField::Description => "description",
            DiffField::DateCreated => "dateCreated",
            DiffField::Phase => "phase",
        }
    }
}

impl std::fmt::Display for DiffField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field whose value differs between the old and new side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field: DiffField,
    pub old_value: Value,
    pub new_value: Value,
}

/// A plugin present on both sides with a different version and/or phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedPlugin {
    pub sid: String,
    pub unique_name: String,
    /// `version` then `phase`, only those that differ
    pub changes: Vec<FieldChange>,
}

/// Plugin-set differences keyed by plugin sid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginChanges {
    /// In new but not old, in new's listing order
    pub added: Vec<PluginEntry>,
    /// In old but not new, in old's listing order
    pub removed: Vec<PluginEntry>,
    /// In both with differences, in new's listing order
    pub changed: Vec<ChangedPlugin>,
}

impl PluginChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Structured diff between two configuration snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    /// `version`, `description`, `dateCreated` changes, in that order
    pub configuration: Vec<FieldChange>,
    pub plugins: PluginChanges,
}

impl DiffResult {
    /// True when the two snapshots are equivalent for diffing purposes
    pub fn is_empty(&self) -> bool {
        self.configuration.is_empty() && self.plugins.is_empty()
    }
}
