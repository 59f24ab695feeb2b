//! OpenAI-compatible client construction.
//!
//! The completion service is usually a local server (LM Studio, llama.cpp,
//! Ollama) speaking the OpenAI chat API, so the base URL and key come from
//! settings rather than the OpenAI defaults.

use crate::config::CompletionSettings;
use crate::error::{ClipmindError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create a client for the configured completion service.
pub fn create_client(settings: &CompletionSettings) -> Result<Client<OpenAIConfig>> {
    create_client_with_timeout(
        &settings.base_url,
        &settings.api_key,
        settings.timeout(),
    )
}

/// Create a client with an explicit base URL, key and timeout.
///
/// Retries are disabled: a failed request surfaces immediately.
pub fn create_client_with_timeout(
    base_url: &str,
    api_key: &str,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ClipmindError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let config = OpenAIConfig::new()
        .with_api_base(base_url.trim_end_matches('/'))
        .with_api_key(api_key);

    let no_retry = backoff::ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build();

    Ok(Client::with_config(config)
        .with_http_client(http_client)
        .with_backoff(no_retry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::config::Config;

    #[test]
    fn test_client_uses_configured_base() {
        let settings = CompletionSettings {
            base_url: "http://localhost:1234/v1/".to_string(),
            ..CompletionSettings::default()
        };
        let client = create_client(&settings).unwrap();
        assert_eq!(client.config().api_base(), "http://localhost:1234/v1");
    }
}
