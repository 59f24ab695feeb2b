//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{ClipmindError, Result};
use std::path::Path;
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// The full pipeline needs yt-dlp, whisper.cpp and a webhook.
    Run,
    /// Summarize/translate only need the completion service.
    Complete,
    /// Posting needs a webhook.
    Post,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    settings.validate()?;
    match operation {
        Operation::Run => {
            settings.require_webhook()?;
            check_tool("yt-dlp")?;
            check_file(&settings.whisper_binary(), "whisper-cli binary")?;
            check_file(&settings.whisper_model(), "Whisper model")?;
        }
        Operation::Complete => {}
        Operation::Post => {
            settings.require_webhook()?;
        }
    }
    Ok(())
}

/// Check if an external tool on PATH responds to `--version`.
pub fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(ClipmindError::process(
            name,
            "installed but not working correctly",
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ClipmindError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(ClipmindError::process(name, e.to_string())),
    }
}

fn check_file(path: &Path, what: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ClipmindError::Config(format!(
            "{} not found at {}",
            what,
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_has_no_external_requirements() {
        assert!(check(Operation::Complete, &Settings::default()).is_ok());
    }

    #[test]
    fn test_post_requires_webhook() {
        let settings = Settings::default();
        assert!(matches!(
            check(Operation::Post, &settings),
            Err(ClipmindError::Config(_))
        ));

        let mut settings = Settings::default();
        settings.delivery.webhook_url = Some("https://discord.com/api/webhooks/1/x".to_string());
        assert!(check(Operation::Post, &settings).is_ok());
    }

    #[test]
    fn test_run_reports_missing_webhook_first() {
        let err = check(Operation::Run, &Settings::default()).unwrap_err();
        assert!(matches!(err, ClipmindError::Config(msg) if msg.contains("DISCORD_WEBHOOK_URL")));
    }
}
