//! Video metadata and audio retrieval.
//!
//! The fetcher is a trait so the orchestrator can be driven without network
//! access; [`YtDlpFetcher`] is the production implementation.

mod ytdlp;

pub use ytdlp::YtDlpFetcher;

use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Metadata about a video, as reported by the fetcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video title.
    pub title: String,
    /// Channel or uploader name.
    pub channel: String,
    /// Channel page URL (empty if unknown).
    pub channel_url: String,
    /// Duration in seconds (if known).
    pub duration_seconds: Option<u32>,
    /// Upload date (if known).
    pub upload_date: Option<NaiveDate>,
}

impl VideoMetadata {
    /// Title used when the fetcher reports none.
    pub const UNKNOWN_TITLE: &'static str = "unknown_title";
    /// Channel used when the fetcher reports none.
    pub const UNKNOWN_CHANNEL: &'static str = "unknown_channel";

    /// Build metadata from a yt-dlp style JSON document.
    ///
    /// Missing fields fall back to placeholders rather than failing the run.
    pub fn from_json(json: &serde_json::Value) -> Self {
        let title = json["title"]
            .as_str()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(Self::UNKNOWN_TITLE)
            .to_string();

        let channel = json["channel"]
            .as_str()
            .or_else(|| json["uploader"].as_str())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(Self::UNKNOWN_CHANNEL)
            .to_string();

        let channel_url = json["channel_url"]
            .as_str()
            .or_else(|| json["uploader_url"].as_str())
            .unwrap_or_default()
            .to_string();

        let duration_seconds = json["duration"].as_f64().map(|d| d as u32);

        // yt-dlp returns the date as YYYYMMDD
        let upload_date = json["upload_date"]
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y%m%d").ok());

        Self {
            title,
            channel,
            channel_url,
            duration_seconds,
            upload_date,
        }
    }
}

/// Source of video metadata and audio.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Fetch metadata for the video at `url`.
    async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata>;

    /// Download the audio track of `url` as WAV to `wav_path`.
    ///
    /// Returns the path of the written file.
    async fn download_audio(&self, url: &str, wav_path: &Path) -> Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_full() {
        let meta = VideoMetadata::from_json(&json!({
            "title": "Intro to Demography",
            "channel": "Open Lectures",
            "channel_url": "https://www.youtube.com/channel/UC123",
            "duration": 3725.4,
            "upload_date": "20240131",
        }));

        assert_eq!(meta.title, "Intro to Demography");
        assert_eq!(meta.channel, "Open Lectures");
        assert_eq!(meta.channel_url, "https://www.youtube.com/channel/UC123");
        assert_eq!(meta.duration_seconds, Some(3725));
        assert_eq!(meta.upload_date, NaiveDate::from_ymd_opt(2024, 1, 31));
    }

    #[test]
    fn test_from_json_fallbacks() {
        let meta = VideoMetadata::from_json(&json!({ "uploader": "someone" }));
        assert_eq!(meta.title, VideoMetadata::UNKNOWN_TITLE);
        assert_eq!(meta.channel, "someone");
        assert_eq!(meta.channel_url, "");
        assert_eq!(meta.duration_seconds, None);
        assert_eq!(meta.upload_date, None);

        let meta = VideoMetadata::from_json(&json!({}));
        assert_eq!(meta.channel, VideoMetadata::UNKNOWN_CHANNEL);
    }
}
