//! Command-line arguments and command execution

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use plugscope_foundation::{Error, ServiceConfig};
use plugscope_gateway::HttpGateway;
use plugscope_snapshot::{
    render_configuration_listing, render_diff, render_plugin_listing, render_snapshot, DiffOptions,
    ResourceKind, Toolkit,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// PlugScope - inspect and diff Flex plugin configurations
#[derive(Parser, Debug)]
#[command(name = "plugscope")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Plugin Service base URL (overrides env and config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Account username (overrides env and config)
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Account password or auth token (overrides env and config)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show one configuration and its installed plugins
    Describe {
        /// Configuration sid, or "active"
        identifier: String,
    },
    /// Diff two configurations
    Diff {
        /// Old configuration sid, or "active"
        old: String,
        /// New configuration sid, or "active"
        new: String,
        /// Resource kind to diff
        #[arg(long, default_value_t = ResourceKind::Configuration.to_string())]
        resource: String,
    },
    /// List configurations, marking the one the active release uses
    Configurations {
        /// Token from a previous page
        #[arg(long)]
        page_token: Option<String>,
    },
    /// List plugins, marking those installed by the active release
    Plugins {
        /// Token from a previous page
        #[arg(long)]
        page_token: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Args {
    /// Command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, mut config: ServiceConfig) -> ServiceConfig {
        if let Some(url) = &self.base_url {
            config = config.base_url(url.clone());
        }
        if let Some(username) = &self.username {
            config.username = Some(username.clone());
        }
        if let Some(password) = &self.password {
            config.password = Some(password.clone());
        }
        config
    }
}

/// Execute the parsed command and return what goes to stdout
pub async fn run(args: &Args) -> anyhow::Result<String> {
    let config = ServiceConfig::load().context("Failed to load service configuration")?;
    let config = args.apply_overrides(config);

    let gateway = HttpGateway::new(&config)?;
    tracing::debug!("Using Plugin Service at {}", gateway.base_url());

    execute(&Toolkit::new(Arc::new(gateway)), &args.command, args.format).await
}

/// Run one command against a toolkit and format the result
pub async fn execute(toolkit: &Toolkit, command: &Command, format: OutputFormat) -> anyhow::Result<String> {
    let output = match command {
        Command::Describe { identifier } => {
            let described = toolkit.describe(identifier).await?;
            format_output(format, &described, render_snapshot)?
        }
        Command::Diff { old, new, resource } => {
            let options = DiffOptions {
                resource: resource.clone(),
                old_identifier: old.clone(),
                new_identifier: new.clone(),
            };
            let diff = toolkit.diff(options).await?;
            format_output(format, &diff, render_diff)?
        }
        Command::Configurations { page_token } => {
            let listing = toolkit.list_configurations(page_token.as_deref()).await?;
            format_output(format, &listing, render_configuration_listing)?
        }
        Command::Plugins { page_token } => {
            let listing = toolkit.list_plugins(page_token.as_deref()).await?;
            format_output(format, &listing, render_plugin_listing)?
        }
    };
    Ok(output)
}

fn format_output<T: Serialize>(
    format: OutputFormat,
    value: &T,
    render: impl Fn(&T) -> String,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render(value)),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(value)?)),
    }
}

/// Render a failure for the selected output format
///
/// Library errors keep their stable kind; anything else reports `internal`.
pub fn format_error(format: OutputFormat, err: &anyhow::Error) -> String {
    let (kind, message) = match err.downcast_ref::<Error>() {
        Some(error) => (error.kind(), error.to_string()),
        None => ("internal", format!("{:#}", err)),
    };

    match format {
        OutputFormat::Text => format!("Error: {}", message),
        OutputFormat::Json => json!({ "error": { "kind": kind, "message": message } }).to_string(),
    }
}
