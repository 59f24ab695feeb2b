//! Chat-completion backed summarizer and translator.

use super::{Completer, CompletionMode};
use crate::config::{CompletionSettings, Prompts};
use crate::error::{ClipmindError, Result};
use crate::openai::create_client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Sampling temperature for both modes.
pub const TEMPERATURE: f32 = 0.3;

/// Summarizes and translates text via an OpenAI-compatible chat endpoint.
pub struct Summarizer {
    client: Client<OpenAIConfig>,
    model: String,
    prompts: Prompts,
}

impl Summarizer {
    /// Create a summarizer for the configured completion service.
    pub fn new(settings: &CompletionSettings, prompts: Prompts) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
            model: settings.model.clone(),
            prompts,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_messages(&self, text: &str, mode: CompletionMode) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mode_prompts = mode.prompts(&self.prompts);

        let mut vars = HashMap::new();
        vars.insert("text".to_string(), text.to_string());
        let user_prompt = Prompts::render(&mode_prompts.user, &vars);

        Ok(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(mode_prompts.system.clone())
                .build()
                .map_err(|e| ClipmindError::InvalidInput(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| ClipmindError::InvalidInput(e.to_string()))?
                .into(),
        ])
    }
}

#[async_trait]
impl Completer for Summarizer {
    #[instrument(skip(self, text), fields(mode = %mode, model = %self.model, input_len = text.chars().count()))]
    async fn complete(&self, text: &str, mode: CompletionMode) -> Result<String> {
        if text.trim().is_empty() {
            return Err(ClipmindError::InvalidInput(format!(
                "Input text for {} is empty",
                mode
            )));
        }

        info!("Requesting {} from {}", mode, self.model);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(self.build_messages(text, mode)?)
            .temperature(TEMPERATURE)
            .build()
            .map_err(|e| ClipmindError::InvalidInput(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            ClipmindError::Upstream(format!("Completion request failed: {}", e))
        })?;

        let output = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ClipmindError::Upstream("Empty response from completion service".to_string()))?
            .to_string();

        debug!("Completion output length={}", output.chars().count());
        Ok(output)
    }
}
