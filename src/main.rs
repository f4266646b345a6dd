//! ytqa CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ytqa::cli::{commands, Cli, Commands};
use ytqa::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    let log_level = cli.log_level(&settings.general.log_level);

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ytqa={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        None => {
            commands::run_serve(None, None, settings).await?;
        }

        Some(Commands::Serve { host, port }) => {
            commands::run_serve(host, port, settings).await?;
        }

        Some(Commands::Transcript { video }) => {
            commands::run_transcript(&video, settings).await?;
        }

        Some(Commands::Ask { video, question }) => {
            commands::run_ask(&video, &question, settings).await?;
        }

        Some(Commands::Config { action }) => {
            commands::run_config(&action, settings, cli.config.as_deref())?;
        }
    }

    Ok(())
}
