//! Configuration settings for Clipmind.
//!
//! Settings come from built-in defaults, an optional TOML file, and then the
//! environment (including a `.env` file loaded by the binary). CLI flags are
//! applied on top by the command layer.

use crate::delivery::MAX_PART_LABEL_LEN;
use crate::error::{ClipmindError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable for the chat webhook URL.
pub const ENV_WEBHOOK_URL: &str = "DISCORD_WEBHOOK_URL";
/// Environment variable for the output root directory.
pub const ENV_OUTROOT: &str = "OUTROOT";
/// Environment variable for the whisper.cpp CLI binary.
pub const ENV_WHISPER_BIN: &str = "WHISPER_BIN";
/// Environment variable for the whisper.cpp model file.
pub const ENV_WHISPER_MODEL: &str = "WHISPER_MODEL";
/// Environment variable for the completion service base URL.
pub const ENV_BASE_URL: &str = "BASE_URL";
/// Environment variable for the completion service API key.
pub const ENV_API_KEY: &str = "API_KEY";
/// Environment variable for the completion model identifier.
pub const ENV_MODEL: &str = "MODEL";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub whisper: WhisperSettings,
    pub completion: CompletionSettings,
    pub delivery: DeliverySettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Root directory for per-run artifacts.
    pub outroot: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Upper bound for yt-dlp and whisper-cli runs. Unbounded when unset.
    pub process_timeout_secs: Option<u64>,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            outroot: "~/clipmind/data".to_string(),
            log_level: "info".to_string(),
            process_timeout_secs: None,
        }
    }
}

/// whisper.cpp transcription settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WhisperSettings {
    /// Path to the `whisper-cli` binary.
    pub binary: String,
    /// Path to the ggml model file.
    pub model: String,
}

impl Default for WhisperSettings {
    fn default() -> Self {
        Self {
            binary: "~/whisper.cpp/build/bin/whisper-cli".to_string(),
            model: "~/whisper.cpp/models/ggml-base.en.bin".to_string(),
        }
    }
}

/// Completion service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// Base URL of the OpenAI-compatible API (including `/v1`).
    pub base_url: String,
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl CompletionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1234/v1".to_string(),
            api_key: "not-needed".to_string(),
            model: "openai/gpt-oss-20b".to_string(),
            timeout_secs: 300,
        }
    }
}

/// Chat delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliverySettings {
    /// Webhook URL of the target channel.
    pub webhook_url: Option<String>,
    /// Target chunk size for natural-boundary splitting.
    pub soft_limit: usize,
    /// Absolute ceiling for a single message.
    pub hard_limit: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            webhook_url: None,
            soft_limit: 1900,
            hard_limit: 2000,
            timeout_secs: 10,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory holding `summarize.toml` / `translate.toml` overrides.
    pub custom_dir: Option<String>,
}

impl Settings {
    /// Load settings from a specific path, or default location if None,
    /// then apply environment overrides.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else if path.is_some() {
            return Err(ClipmindError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        } else {
            Settings::default()
        };

        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Override settings from environment-style key lookups.
    ///
    /// Empty values are ignored so that `KEY=` in a `.env` file does not
    /// clobber a configured value.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_WEBHOOK_URL) {
            self.delivery.webhook_url = Some(v);
        }
        if let Some(v) = get(ENV_OUTROOT) {
            self.general.outroot = v;
        }
        if let Some(v) = get(ENV_WHISPER_BIN) {
            self.whisper.binary = v;
        }
        if let Some(v) = get(ENV_WHISPER_MODEL) {
            self.whisper.model = v;
        }
        if let Some(v) = get(ENV_BASE_URL) {
            self.completion.base_url = v;
        }
        if let Some(v) = get(ENV_API_KEY) {
            self.completion.api_key = v;
        }
        if let Some(v) = get(ENV_MODEL) {
            self.completion.model = v;
        }
    }

    /// Check limits and URLs for consistency.
    pub fn validate(&self) -> Result<()> {
        let delivery = &self.delivery;
        if delivery.soft_limit == 0 {
            return Err(ClipmindError::Config(
                "delivery.soft_limit must be greater than zero".to_string(),
            ));
        }
        let min_hard = delivery.soft_limit.checked_add(MAX_PART_LABEL_LEN);
        if min_hard.map_or(true, |min| delivery.hard_limit < min) {
            return Err(ClipmindError::Config(format!(
                "delivery.hard_limit ({}) must exceed delivery.soft_limit ({}) by at least {}",
                delivery.hard_limit, delivery.soft_limit, MAX_PART_LABEL_LEN
            )));
        }

        url::Url::parse(&self.completion.base_url).map_err(|e| {
            ClipmindError::Config(format!(
                "Invalid completion.base_url '{}': {}",
                self.completion.base_url, e
            ))
        })?;

        if let Some(webhook) = &delivery.webhook_url {
            url::Url::parse(webhook)
                .map_err(|e| ClipmindError::Config(format!("Invalid webhook URL: {}", e)))?;
        }

        Ok(())
    }

    /// The configured webhook URL, or a configuration error if none is set.
    pub fn require_webhook(&self) -> Result<&str> {
        self.delivery.webhook_url.as_deref().ok_or_else(|| {
            ClipmindError::Config(format!(
                "Webhook URL is not configured. Set {} in the environment or .env",
                ENV_WEBHOOK_URL
            ))
        })
    }

    /// A copy with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.completion.api_key = mask(&copy.completion.api_key);
        copy.delivery.webhook_url = copy.delivery.webhook_url.as_deref().map(truncate_url);
        copy
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clipmind")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded output root.
    pub fn outroot(&self) -> PathBuf {
        Self::expand_path(&self.general.outroot)
    }

    /// Get the expanded whisper-cli path.
    pub fn whisper_binary(&self) -> PathBuf {
        Self::expand_path(&self.whisper.binary)
    }

    /// Get the expanded whisper model path.
    pub fn whisper_model(&self) -> PathBuf {
        Self::expand_path(&self.whisper.model)
    }

    pub fn process_timeout(&self) -> Option<Duration> {
        self.general.process_timeout_secs.map(Duration::from_secs)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery.timeout_secs)
    }
}

fn mask(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        let head: String = secret.chars().take(4).collect();
        format!("{}****", head)
    }
}

/// Shorten a URL for logs so webhook tokens are not printed in full.
pub fn truncate_url(url: &str) -> String {
    const KEEP: usize = 40;
    if url.chars().count() <= KEEP {
        url.to_string()
    } else {
        let head: String = url.chars().take(KEEP).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.delivery.soft_limit, 1900);
        assert_eq!(settings.delivery.hard_limit, 2000);
        assert_eq!(settings.completion.base_url, "http://localhost:1234/v1");
        assert_eq!(settings.completion.model, "openai/gpt-oss-20b");
        assert!(settings.delivery.webhook_url.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings.apply_env(lookup(&[
            (ENV_WEBHOOK_URL, "https://discord.com/api/webhooks/1/abc"),
            (ENV_OUTROOT, "/data/out"),
            (ENV_MODEL, "llama3"),
            (ENV_API_KEY, ""),
        ]));

        assert_eq!(
            settings.require_webhook().unwrap(),
            "https://discord.com/api/webhooks/1/abc"
        );
        assert_eq!(settings.outroot(), PathBuf::from("/data/out"));
        assert_eq!(settings.completion.model, "llama3");
        // Empty values leave the default in place
        assert_eq!(settings.completion.api_key, "not-needed");
    }

    #[test]
    fn test_missing_webhook_is_config_error() {
        let settings = Settings::default();
        assert!(matches!(
            settings.require_webhook(),
            Err(ClipmindError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_tight_limits() {
        let mut settings = Settings::default();
        settings.delivery.hard_limit = settings.delivery.soft_limit;
        assert!(matches!(settings.validate(), Err(ClipmindError::Config(_))));

        let mut settings = Settings::default();
        settings.delivery.soft_limit = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_soft_limit_near_max() {
        let mut settings = Settings::default();
        settings.delivery.soft_limit = usize::MAX;
        settings.delivery.hard_limit = usize::MAX;
        assert!(matches!(settings.validate(), Err(ClipmindError::Config(_))));

        settings.delivery.soft_limit = usize::MAX - MAX_PART_LABEL_LEN;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_completion_timeout() {
        let mut settings = Settings::default();
        assert_eq!(settings.completion.timeout(), Duration::from_secs(300));
        settings.completion.timeout_secs = 5;
        assert_eq!(settings.completion.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut settings = Settings::default();
        settings.delivery.webhook_url = Some("not a url".to_string());
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.completion.base_url = "localhost".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip_with_partial_file() {
        let parsed: Settings = toml::from_str(
            r#"
            [delivery]
            soft_limit = 1500

            [whisper]
            model = "/models/ggml-small.bin"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.delivery.soft_limit, 1500);
        assert_eq!(parsed.delivery.hard_limit, 2000);
        assert_eq!(parsed.whisper_model(), PathBuf::from("/models/ggml-small.bin"));
        assert_eq!(parsed.general.outroot, "~/clipmind/data");
    }

    #[test]
    fn test_load_from_missing_explicit_path() {
        let path = PathBuf::from("/nonexistent/clipmind/config.toml");
        assert!(matches!(
            Settings::load_from(Some(&path)),
            Err(ClipmindError::Config(_))
        ));
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let mut settings = Settings::default();
        settings.completion.api_key = "sk-secret-value".to_string();
        settings.delivery.webhook_url =
            Some("https://discord.com/api/webhooks/123456789/very-secret-token".to_string());

        let shown = settings.redacted();
        assert_eq!(shown.completion.api_key, "sk-s****");
        assert!(shown.delivery.webhook_url.unwrap().ends_with("..."));
    }
}
