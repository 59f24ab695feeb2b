//! Summarize and translate commands.
//!
//! Run one completion step on a text file, e.g. to resume a pipeline run
//! that failed after transcription.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::completion::{Completer, CompletionMode, Summarizer};
use crate::config::{Prompts, Settings};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the summarize or translate command on `file`.
pub async fn run_complete(mode: CompletionMode, file: &Path, settings: Settings) -> Result<()> {
    preflight::check(Operation::Complete, &settings)?;

    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    tracing::info!("file read, length={}", text.chars().count());

    let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
    let summarizer = Summarizer::new(&settings.completion, prompts)?;

    let spinner = Output::spinner(&format!("Running {} with {}...", mode, summarizer.model()));
    let result = summarizer.complete(&text, mode).await;
    spinner.finish_and_clear();
    let output = result?;

    let out_path = mode.output_path(file);
    tokio::fs::write(&out_path, &output)
        .await
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    Output::success(&format!("Output written to {}", out_path.display()));
    Ok(())
}
