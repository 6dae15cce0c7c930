//! PlugScope CLI - Main entry point

mod cli;

use clap::Parser;
use cli::{Args, OutputFormat};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging (stderr, so JSON on stdout stays clean)
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli::run(&args).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!("Command failed: {:?}", err);
            let message = cli::format_error(args.format, &err);
            match args.format {
                OutputFormat::Json => println!("{}", message),
                OutputFormat::Text => eprintln!("{}", message),
            }
            ExitCode::FAILURE
        }
    }
}
