//! Configuration module for Clipmind.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{ModePrompts, Prompts};
pub use settings::{
    truncate_url, CompletionSettings, DeliverySettings, GeneralSettings, PromptSettings,
    Settings, WhisperSettings, ENV_API_KEY, ENV_BASE_URL, ENV_MODEL, ENV_OUTROOT,
    ENV_WEBHOOK_URL, ENV_WHISPER_BIN, ENV_WHISPER_MODEL,
};
