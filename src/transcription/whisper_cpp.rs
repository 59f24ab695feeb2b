//! whisper.cpp transcription implementation.

use super::{transcript_path, Transcriber};
use crate::error::{ClipmindError, Result};
use crate::tools::run_tool;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, instrument};

const WHISPER_CLI: &str = "whisper-cli";

/// Transcriber that runs the whisper.cpp `whisper-cli` binary.
pub struct WhisperCppTranscriber {
    binary: PathBuf,
    model: PathBuf,
    timeout: Option<Duration>,
}

impl WhisperCppTranscriber {
    /// Create a transcriber for the given binary and ggml model.
    pub fn new(binary: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            model: model.into(),
            timeout: None,
        }
    }

    /// Bound each whisper-cli invocation.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Transcriber for WhisperCppTranscriber {
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe(&self, audio_path: &Path, output_base: &Path) -> Result<PathBuf> {
        if !self.model.exists() {
            return Err(ClipmindError::Config(format!(
                "Whisper model not found: {}",
                self.model.display()
            )));
        }

        info!("Transcribing with model {}", self.model.display());

        let mut command = Command::new(&self.binary);
        command
            .arg("-m").arg(&self.model)
            .arg("-f").arg(audio_path)
            .arg("-otxt")
            .arg("-of").arg(output_base);

        run_tool(WHISPER_CLI, command, self.timeout).await?;

        let transcript = transcript_path(output_base);
        if !transcript.exists() {
            return Err(ClipmindError::MissingArtifact(transcript));
        }

        debug!("Transcript written to {}", transcript.display());
        Ok(transcript)
    }
}
