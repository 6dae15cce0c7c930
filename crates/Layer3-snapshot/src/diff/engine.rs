//! Snapshot diff computation.
//!
//! [`compute_diff`] is total over well-formed snapshots: it never fails and
//! never mutates its inputs.

use crate::diff::model::{ChangedPlugin, DiffField, DiffResult, FieldChange, PluginChanges};
use crate::snapshot::{ConfigurationSnapshot, PluginEntry};
use serde_json::Value;
use std::collections::HashMap;

/// Compare two snapshots field-by-field and plugin-by-plugin
///
/// Configuration fields are compared in the fixed order `version`,
/// `description`, `dateCreated`; `sid` is identity and never compared.
/// Plugins are matched by sid. A plugin lands in exactly one of
/// added/removed/changed, or in none when its version and phase match.
pub fn compute_diff(old: &ConfigurationSnapshot, new: &ConfigurationSnapshot) -> DiffResult {
    DiffResult {
        configuration: configuration_changes(old, new),
        plugins: plugin_changes(&old.plugins, &new.plugins),
    }
}

fn configuration_changes(old: &ConfigurationSnapshot, new: &ConfigurationSnapshot) -> Vec<FieldChange> {
    [
        field_change(DiffField::Version, &old.version, &new.version),
        field_change(DiffField::Description, &old.description, &new.description),
        field_change(DiffField::DateCreated, &old.date_created, &new.date_created),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn plugin_field_changes(old: &PluginEntry, new: &PluginEntry) -> Vec<FieldChange> {
    [
        field_change(DiffField::Version, &old.version, &new.version),
        field_change(DiffField::Phase, &old.phase, &new.phase),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// A change entry when `old != new`, carrying both values verbatim
fn field_change<T>(field: DiffField, old: &T, new: &T) -> Option<FieldChange>
where
    T: PartialEq + Into<Value> + Clone,
{
    (old != new).then(|| FieldChange {
        field,
        old_value: old.clone().into(),
        new_value: new.clone().into(),
    })
}

fn plugin_changes(old: &[PluginEntry], new: &[PluginEntry]) -> PluginChanges {
    let old_by_sid: HashMap<&str, &PluginEntry> = old.iter().map(|p| (p.sid.as_str(), p)).collect();
    let new_by_sid: HashMap<&str, &PluginEntry> = new.iter().map(|p| (p.sid.as_str(), p)).collect();

    let removed = old
        .iter()
        .filter(|p| !new_by_sid.contains_key(p.sid.as_str()))
        .cloned()
        .collect();

    let mut added = Vec::new();
    let mut changed = Vec::new();
    for entry in new {
        match old_by_sid.get(entry.sid.as_str()) {
            None => added.push(entry.clone()),
            Some(previous) => {
                let changes = plugin_field_changes(previous, entry);
                if !changes.is_empty() {
                    changed.push(ChangedPlugin {
                        sid: entry.sid.clone(),
                        unique_name: entry.unique_name.clone(),
                        changes,
                    });
                }
            }
        }
    }

    PluginChanges {
        added,
        removed,
        changed,
    }
}
