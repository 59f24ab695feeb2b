//! yt-dlp backed media fetcher.

use super::{MediaFetcher, VideoMetadata};
use crate::error::{ClipmindError, Result};
use crate::tools::run_tool;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, instrument};

const YT_DLP: &str = "yt-dlp";

/// Fetches metadata and audio by shelling out to `yt-dlp`.
pub struct YtDlpFetcher {
    program: String,
    prefix_args: Vec<String>,
    timeout: Option<Duration>,
}

impl YtDlpFetcher {
    pub fn new() -> Self {
        Self {
            program: YT_DLP.to_string(),
            prefix_args: Vec::new(),
            timeout: None,
        }
    }

    /// Bound each yt-dlp invocation.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Launch yt-dlp through another program, e.g. `python3 -m yt_dlp`.
    pub fn with_program<I, S>(mut self, program: impl Into<String>, prefix_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.program = program.into();
        self.prefix_args = prefix_args.into_iter().map(Into::into).collect();
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.prefix_args);
        command
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    #[instrument(skip(self))]
    async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata> {
        let mut command = self.command();
        command.args(["-J", "--no-playlist", "--no-warnings", url]);

        let output = run_tool(YT_DLP, command, self.timeout).await?;

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).map_err(|e| {
            ClipmindError::process(YT_DLP, format!("unparseable metadata output: {e}"))
        })?;

        Ok(VideoMetadata::from_json(&json))
    }

    #[instrument(skip(self), fields(wav_path = %wav_path.display()))]
    async fn download_audio(&self, url: &str, wav_path: &Path) -> Result<PathBuf> {
        let parent = wav_path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        // yt-dlp picks the extension after extraction, so hand it a template
        let template = wav_path.with_extension("%(ext)s");

        info!("Downloading audio from {}", url);

        let mut command = self.command();
        command
            .arg("--no-playlist")
            .arg("-f").arg("bestaudio")
            .arg("-x")
            .arg("--audio-format").arg("wav")
            .arg("--no-warnings")
            .arg("-o").arg(&template)
            .arg(url);

        run_tool(YT_DLP, command, self.timeout).await?;

        if !wav_path.exists() {
            return Err(ClipmindError::MissingArtifact(wav_path.to_path_buf()));
        }

        Ok(wav_path.to_path_buf())
    }
}
