//! Pipeline orchestrator for Clipmind.
//!
//! Drives one video from URL to channel post:
//! fetch metadata, download audio, transcribe, summarize, translate,
//! persist metadata, deliver. Stages run strictly in order; the first
//! failure stops the run and is reported together with the failing stage.

use crate::artifacts::{RunLayout, RunMetadata};
use crate::completion::{Completer, CompletionMode, Summarizer};
use crate::config::{Prompts, Settings};
use crate::delivery::{
    deliver, format_messages, DeliveryHeader, DeliveryReport, Limits, MessageSink, WebhookPoster,
};
use crate::error::{ClipmindError, Result};
use crate::media::{MediaFetcher, VideoMetadata, YtDlpFetcher};
use crate::transcription::{Transcriber, WhisperCppTranscriber};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Pipeline stages, in execution order.
///
/// A run that passes every stage ends as `Ok(RunOutcome)`; one that fails
/// ends as `Err(ClipmindError::StageFailed)` naming the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    FetchMetadata,
    DownloadAudio,
    Transcribe,
    Summarize,
    Translate,
    Persist,
    Deliver,
}

impl Stage {
    /// Progress line shown while the stage runs.
    fn progress(self) -> &'static str {
        match self {
            Stage::FetchMetadata => "Fetching video metadata...",
            Stage::DownloadAudio => "Downloading audio...",
            Stage::Transcribe => "Transcribing with Whisper...",
            Stage::Summarize => "Summarizing in English...",
            Stage::Translate => "Translating to Japanese...",
            Stage::Persist => "Writing metadata...",
            Stage::Deliver => "Posting to channel...",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::FetchMetadata => "fetch_metadata",
            Stage::DownloadAudio => "download_audio",
            Stage::Transcribe => "transcribe",
            Stage::Summarize => "summarize",
            Stage::Translate => "translate",
            Stage::Persist => "persist",
            Stage::Deliver => "deliver",
        };
        write!(f, "{}", name)
    }
}

/// The main orchestrator for the Clipmind pipeline.
pub struct Orchestrator {
    outroot: PathBuf,
    limits: Limits,
    fetcher: Arc<dyn MediaFetcher>,
    transcriber: Arc<dyn Transcriber>,
    completer: Arc<dyn Completer>,
    sink: Arc<dyn MessageSink>,
}

impl Orchestrator {
    /// Create an orchestrator with the production components.
    ///
    /// Fails with a configuration error if no webhook is configured, so a
    /// run never does the expensive work only to find nowhere to post.
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let webhook = settings.require_webhook()?;

        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;

        let fetcher = Arc::new(YtDlpFetcher::new().with_timeout(settings.process_timeout()));
        let transcriber = Arc::new(
            WhisperCppTranscriber::new(settings.whisper_binary(), settings.whisper_model())
                .with_timeout(settings.process_timeout()),
        );
        let completer = Arc::new(Summarizer::new(&settings.completion, prompts)?);
        let sink = Arc::new(WebhookPoster::new(webhook, settings.delivery_timeout())?);

        info!("Using Whisper binary: {}", settings.whisper_binary().display());
        info!("Using Whisper model: {}", settings.whisper_model().display());
        info!("Using completion model: {}", settings.completion.model);

        Ok(Self::with_components(settings, fetcher, transcriber, completer, sink))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: &Settings,
        fetcher: Arc<dyn MediaFetcher>,
        transcriber: Arc<dyn Transcriber>,
        completer: Arc<dyn Completer>,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self {
            outroot: settings.outroot(),
            limits: Limits {
                soft: settings.delivery.soft_limit,
                hard: settings.delivery.hard_limit,
            },
            fetcher,
            transcriber,
            completer,
            sink,
        }
    }

    /// Run the whole pipeline for `url`.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn run(&self, url: &str) -> Result<RunOutcome> {
        info!("Pipeline started for: {}", url);

        let meta = stage(Stage::FetchMetadata, self.fetcher.fetch_metadata(url)).await?;
        eprintln!("  Title: {}", meta.title);
        eprintln!("  Channel: {}", meta.channel);

        let layout = RunLayout::new(&self.outroot, &meta.channel, &meta.title);

        // Creates the output root too.
        let audio = stage(Stage::DownloadAudio, async {
            layout.create()?;
            self.fetcher.download_audio(url, &layout.audio()).await
        })
        .await?;

        let transcript_path = stage(Stage::Transcribe, async {
            let path = self
                .transcriber
                .transcribe(&audio, &layout.transcript_base())
                .await?;
            debug!("Transcript at {}", path.display());
            Ok(path)
        })
        .await?;

        let summary_en = stage(Stage::Summarize, async {
            let transcript = tokio::fs::read_to_string(&transcript_path).await?;
            if transcript.trim().is_empty() {
                return Err(ClipmindError::InvalidInput(format!(
                    "Transcript is empty: {}",
                    transcript_path.display()
                )));
            }
            let summary = self
                .completer
                .complete(&transcript, CompletionMode::Summarize)
                .await?;
            write_text(&layout.summary(), &summary).await?;
            info!("English summary written to: {}", layout.summary().display());
            Ok(summary)
        })
        .await?;

        let summary_ja = stage(Stage::Translate, async {
            let translated = self
                .completer
                .complete(&summary_en, CompletionMode::Translate)
                .await?;
            write_text(&layout.translated_summary(), &translated).await?;
            info!(
                "Japanese summary written to: {}",
                layout.translated_summary().display()
            );
            Ok(translated)
        })
        .await?;

        stage(Stage::Persist, async {
            RunMetadata::new(&meta, url, &summary_en, &summary_ja).write(&layout.metadata())?;
            info!("Metadata written to: {}", layout.metadata().display());
            Ok(())
        })
        .await?;

        let delivery = stage(Stage::Deliver, async {
            let header = DeliveryHeader::for_video(&meta, url);
            let messages = format_messages(&header, &summary_ja, self.limits)?;
            info!("Delivering {} message(s)", messages.len());
            deliver(self.sink.as_ref(), &messages).await
        })
        .await?;

        info!("Pipeline finished for: {}", meta.title);

        Ok(RunOutcome {
            transcript: transcript_path,
            summary: layout.summary(),
            translated_summary: layout.translated_summary(),
            metadata_file: layout.metadata(),
            audio,
            summary_ja,
            meta,
            delivery,
        })
    }
}

/// Run one stage, tagging any failure with the stage it happened in.
async fn stage<T, F>(stage: Stage, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    eprintln!("  {}", stage.progress());
    debug!("Entering stage {}", stage);

    work.await.map_err(|e| {
        error!("Stage {} failed: {}", stage, e);
        ClipmindError::StageFailed {
            stage,
            source: Box::new(e),
        }
    })
}

async fn write_text(path: &Path, text: &str) -> Result<()> {
    tokio::fs::write(path, text).await?;
    Ok(())
}

/// Result of a completed pipeline run.
#[derive(Debug)]
pub struct RunOutcome {
    pub meta: VideoMetadata,
    pub audio: PathBuf,
    pub transcript: PathBuf,
    pub summary: PathBuf,
    pub translated_summary: PathBuf,
    pub metadata_file: PathBuf,
    /// The delivered (translated) summary text.
    pub summary_ja: String,
    pub delivery: DeliveryReport,
}
