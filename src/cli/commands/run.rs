//! Run command implementation.

use super::post::finish_delivery;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Flag overrides for the run command.
#[derive(Debug, Default, Clone)]
pub struct RunOverrides {
    pub outroot: Option<String>,
    pub whisper_bin: Option<String>,
    pub whisper_model: Option<String>,
    pub webhook: Option<String>,
}

impl RunOverrides {
    /// Apply the flags on top of loaded settings.
    pub fn apply(self, settings: &mut Settings) {
        if let Some(v) = self.outroot {
            settings.general.outroot = v;
        }
        if let Some(v) = self.whisper_bin {
            settings.whisper.binary = v;
        }
        if let Some(v) = self.whisper_model {
            settings.whisper.model = v;
        }
        if let Some(v) = self.webhook {
            settings.delivery.webhook_url = Some(v);
        }
    }
}

/// Run the full pipeline for a URL.
pub async fn run_pipeline(url: &str, overrides: RunOverrides, mut settings: Settings) -> Result<()> {
    overrides.apply(&mut settings);

    if let Err(e) = preflight::check(Operation::Run, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'clipmind doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    Output::info(&format!("Processing: {}", url));

    let orchestrator = Orchestrator::new(&settings)?;
    let outcome = match orchestrator.run(url).await {
        Ok(outcome) => outcome,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    Output::video(&outcome.meta);
    Output::kv("Audio", &outcome.audio.display().to_string());
    Output::kv("Transcript", &outcome.transcript.display().to_string());
    Output::kv("Summary", &outcome.summary.display().to_string());
    Output::kv("Translated", &outcome.translated_summary.display().to_string());
    Output::kv("Metadata", &outcome.metadata_file.display().to_string());

    finish_delivery(&outcome.delivery)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let mut settings = Settings::default();
        settings.general.outroot = "/from/env".to_string();

        RunOverrides {
            outroot: Some("/from/flag".to_string()),
            webhook: Some("https://discord.com/api/webhooks/1/x".to_string()),
            ..RunOverrides::default()
        }
        .apply(&mut settings);

        assert_eq!(settings.general.outroot, "/from/flag");
        assert_eq!(settings.whisper.binary, Settings::default().whisper.binary);
        assert!(settings.require_webhook().is_ok());
    }
}
