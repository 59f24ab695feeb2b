//! Completion stage: summarization and translation through a language model.

mod summarizer;

pub use summarizer::{Summarizer, TEMPERATURE};

use crate::config::{ModePrompts, Prompts};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What the completion service is asked to do with the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionMode {
    /// Summarize an English transcript.
    Summarize,
    /// Translate an English summary into Japanese.
    Translate,
}

impl CompletionMode {
    /// The prompt pair for this mode.
    pub fn prompts(self, prompts: &Prompts) -> &ModePrompts {
        match self {
            CompletionMode::Summarize => &prompts.summarize,
            CompletionMode::Translate => &prompts.translate,
        }
    }

    /// Where the output for `input` is written by the standalone commands.
    ///
    /// `talk.txt` summarizes to `talk_summary.txt`, which translates to
    /// `talk_summary_ja.txt`.
    pub fn output_path(self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let suffix = match self {
            CompletionMode::Summarize => "_summary",
            CompletionMode::Translate => "_ja",
        };
        input.with_file_name(format!("{}{}.txt", stem, suffix))
    }
}

impl std::str::FromStr for CompletionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summarize" => Ok(CompletionMode::Summarize),
            "translate" => Ok(CompletionMode::Translate),
            _ => Err(format!("Unknown completion mode: {}", s)),
        }
    }
}

impl std::fmt::Display for CompletionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionMode::Summarize => write!(f, "summarize"),
            CompletionMode::Translate => write!(f, "translate"),
        }
    }
}

/// Trait for completion backends.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Run `text` through the model in the given mode and return the trimmed output.
    async fn complete(&self, text: &str, mode: CompletionMode) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths_chain() {
        let transcript = Path::new("/data/Ch/Talk/Talk.txt");
        let summary = CompletionMode::Summarize.output_path(transcript);
        assert_eq!(summary, PathBuf::from("/data/Ch/Talk/Talk_summary.txt"));

        let translated = CompletionMode::Translate.output_path(&summary);
        assert_eq!(translated, PathBuf::from("/data/Ch/Talk/Talk_summary_ja.txt"));
    }

    #[test]
    fn test_mode_parse_and_display() {
        assert_eq!("Summarize".parse::<CompletionMode>(), Ok(CompletionMode::Summarize));
        assert_eq!("translate".parse::<CompletionMode>(), Ok(CompletionMode::Translate));
        assert!("paraphrase".parse::<CompletionMode>().is_err());
        assert_eq!(CompletionMode::Translate.to_string(), "translate");
    }
}
