//! Human-readable text rendering
//!
//! The JSON form of every result is its serde serialization; these functions
//! produce the plain-text form shown by the CLI.

use crate::diff::{DiffResult, FieldChange};
use crate::scripts::{ConfigurationListing, DescribedConfiguration, PluginListing};
use serde_json::Value;

/// Render a [`DiffResult`] as an indented change summary
pub fn render_diff(diff: &DiffResult) -> String {
    if diff.is_empty() {
        return "No differences found.\n".to_string();
    }

    let mut out = String::new();

    if !diff.configuration.is_empty() {
        out.push_str("CONFIGURATION\n");
        for change in &diff.configuration {
            out.push_str(&format!("  ~ {}\n", describe_change(change)));
        }
        out.push('\n');
    }

    let plugins = &diff.plugins;
    if !plugins.is_empty() {
        out.push_str("PLUGINS\n");
        for plugin in &plugins.added {
            out.push_str(&format!(
                "  + {}@{} (phase {}, {})\n",
                plugin.unique_name, plugin.version, plugin.phase, plugin.sid
            ));
        }
        for plugin in &plugins.removed {
            out.push_str(&format!(
                "  - {}@{} (phase {}, {})\n",
                plugin.unique_name, plugin.version, plugin.phase, plugin.sid
            ));
        }
        for plugin in &plugins.changed {
            out.push_str(&format!("  ~ {} ({})\n", plugin.unique_name, plugin.sid));
            for change in &plugin.changes {
                out.push_str(&format!("      {}\n", describe_change(change)));
            }
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Summary: {} configuration field(s) changed, {} added, {} removed, {} changed plugin(s)\n",
        diff.configuration.len(),
        plugins.added.len(),
        plugins.removed.len(),
        plugins.changed.len()
    ));
    out
}

/// Render a described configuration with its plugins in listing order
pub fn render_snapshot(described: &DescribedConfiguration) -> String {
    let snapshot = &described.snapshot;
    let mut out = String::new();

    out.push_str(&format!("Configuration {}", snapshot.sid));
    if described.is_active {
        out.push_str(" (active)");
    }
    out.push('\n');
    out.push_str(&format!("  Version:     {}\n", snapshot.version));
    out.push_str(&format!(
        "  Description: {}\n",
        snapshot.description.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("  Created:     {}\n", snapshot.date_created));
    out.push('\n');

    if snapshot.plugins.is_empty() {
        out.push_str("No plugins installed.\n");
        return out;
    }

    out.push_str(&format!("PLUGINS ({})\n", snapshot.plugins.len()));
    for plugin in &snapshot.plugins {
        out.push_str(&format!(
            "  [{}] {}@{}{}\n",
            plugin.phase,
            plugin.unique_name,
            plugin.version,
            if plugin.is_private { " (private)" } else { "" }
        ));
        if !plugin.plugin_url.is_empty() {
            out.push_str(&format!("      {}\n", plugin.plugin_url));
        }
    }
    out
}

/// Render one page of plugins, active ones marked with `*`
pub fn render_plugin_listing(listing: &PluginListing) -> String {
    let mut out = String::new();

    if listing.plugins.is_empty() {
        out.push_str("No plugins found.\n");
    }
    for plugin in &listing.plugins {
        let marker = if plugin.is_active { '*' } else { ' ' };
        out.push_str(&format!("{} {}  {}", marker, plugin.sid, plugin.name));
        if !plugin.friendly_name.is_empty() && plugin.friendly_name != plugin.name {
            out.push_str(&format!("  ({})", plugin.friendly_name));
        }
        out.push('\n');
    }

    if let Some(token) = &listing.next_page_token {
        out.push_str(&format!("\nMore plugins available: --page-token {}\n", token));
    }
    out
}

/// Render one page of configurations, the active one marked with `*`
pub fn render_configuration_listing(listing: &ConfigurationListing) -> String {
    let mut out = String::new();

    if listing.configurations.is_empty() {
        out.push_str("No configurations found.\n");
    }
    for configuration in &listing.configurations {
        let marker = if configuration.is_active { '*' } else { ' ' };
        out.push_str(&format!(
            "{} {}  {}  {}",
            marker, configuration.sid, configuration.version, configuration.date_created
        ));
        if let Some(description) = configuration.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("  {}", description));
        }
        out.push('\n');
    }

    if let Some(token) = &listing.next_page_token {
        out.push_str(&format!("\nMore configurations available: --page-token {}\n", token));
    }
    out
}

fn describe_change(change: &FieldChange) -> String {
    format!(
        "{}: {} -> {}",
        change.field,
        display_value(&change.old_value),
        display_value(&change.new_value)
    )
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "(none)".to_string(),
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}
