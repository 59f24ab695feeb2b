//! On-disk layout of a run's artifacts.
//!
//! Every run writes to `{outroot}/{channel}/{title}/`, where both directory
//! names are sanitized. Files inside share the sanitized title as stem.

use crate::error::Result;
use crate::media::VideoMetadata;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Maximum length of a sanitized name, in characters.
pub const MAX_NAME_LEN: usize = 80;

/// Directory name used when sanitizing leaves nothing.
const FALLBACK_NAME: &str = "untitled";

/// Make a title safe to use as a directory and file name.
///
/// Letters, digits, space, underscore and hyphen are kept; every other
/// character becomes one underscore. The result is cut to
/// [`MAX_NAME_LEN`] characters.
pub fn sanitize_title(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LEN)
        .collect()
}

fn path_component(raw: &str) -> String {
    let name = sanitize_title(raw);
    if name.trim().is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

/// Paths of every artifact written for one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayout {
    dir: PathBuf,
    stem: String,
}

impl RunLayout {
    /// Layout for `title` by `channel` under `outroot`.
    pub fn new(outroot: &Path, channel: &str, title: &str) -> Self {
        let stem = path_component(title);
        let dir = outroot.join(path_component(channel)).join(&stem);
        Self { dir, stem }
    }

    /// Create the run directory.
    pub fn create(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        debug!("Output directory: {}", self.dir.display());
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn audio(&self) -> PathBuf {
        self.file("", "wav")
    }

    /// Base path handed to the transcriber (it appends `.txt`).
    pub fn transcript_base(&self) -> PathBuf {
        self.dir.join(&self.stem)
    }

    pub fn summary(&self) -> PathBuf {
        self.file("_summary", "txt")
    }

    pub fn translated_summary(&self) -> PathBuf {
        self.file("_summary_ja", "txt")
    }

    pub fn metadata(&self) -> PathBuf {
        self.dir.join("metadata.json")
    }

    fn file(&self, suffix: &str, ext: &str) -> PathBuf {
        self.dir.join(format!("{}{}.{}", self.stem, suffix, ext))
    }
}

/// Contents of `metadata.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub title: String,
    pub channel: String,
    pub url: String,
    pub summary_en_len: usize,
    pub summary_ja_len: usize,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub channel_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<NaiveDate>,
}

impl RunMetadata {
    /// Summary lengths are counted in characters.
    pub fn new(meta: &VideoMetadata, url: &str, summary_en: &str, summary_ja: &str) -> Self {
        Self {
            title: meta.title.clone(),
            channel: meta.channel.clone(),
            url: url.to_string(),
            summary_en_len: summary_en.chars().count(),
            summary_ja_len: summary_ja.chars().count(),
            channel_url: meta.channel_url.clone(),
            duration_seconds: meta.duration_seconds,
            upload_date: meta.upload_date,
        }
    }

    /// Write as pretty-printed JSON, keeping non-ASCII text readable.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
