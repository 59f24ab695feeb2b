//! Clipmind CLI entry point.

use anyhow::Result;
use clap::Parser;
use clipmind::cli::{commands, Cli, Commands};
use clipmind::completion::CompletionMode;
use clipmind::config::Settings;
use clipmind::delivery::DeliveryHeader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the process environment still applies.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::load_from(cli.config.as_ref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("clipmind={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match cli.command {
        Commands::Run {
            url,
            outroot,
            whisper_bin,
            whisper_model,
            webhook,
        } => {
            let overrides = commands::RunOverrides {
                outroot,
                whisper_bin,
                whisper_model,
                webhook,
            };
            commands::run_pipeline(&url, overrides, settings).await?;
        }

        Commands::Summarize { file } => {
            commands::run_complete(CompletionMode::Summarize, &file, settings).await?;
        }

        Commands::Translate { file } => {
            commands::run_complete(CompletionMode::Translate, &file, settings).await?;
        }

        Commands::Post {
            title,
            url,
            channel,
            channel_url,
            summary,
            webhook,
        } => {
            let header = DeliveryHeader::new(title, url, channel, channel_url);
            commands::run_post(header, &summary, webhook, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, settings)?;
        }
    }

    Ok(())
}
