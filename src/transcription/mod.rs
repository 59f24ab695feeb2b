//! Transcription module for Clipmind.
//!
//! Speech-to-text runs locally through the whisper.cpp command line tool,
//! which writes a plain-text transcript next to the audio file.

mod whisper_cpp;

pub use whisper_cpp::WhisperCppTranscriber;

use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Trait for transcription engines.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe `audio_path`, writing the transcript to `{output_base}.txt`.
    ///
    /// Returns the path of the transcript file.
    async fn transcribe(&self, audio_path: &Path, output_base: &Path) -> Result<PathBuf>;
}

/// The transcript path produced for an output base.
pub fn transcript_path(output_base: &Path) -> PathBuf {
    let mut name = output_base.as_os_str().to_os_string();
    name.push(".txt");
    PathBuf::from(name)
}
