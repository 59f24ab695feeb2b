//! Delivery message layout.
//!
//! The first message carries the video header and the start of the summary;
//! every further chunk becomes a numbered part message.

use super::segment::segment;
use crate::error::{ClipmindError, Result};
use crate::media::VideoMetadata;
use serde::Serialize;
use tracing::{debug, warn};

/// Prefix placed between the header and the summary text.
pub const SUMMARY_LABEL: &str = "📓: ";

/// Upper bound on the rendered length of a part label (`"📄 Part i/n\n"`).
///
/// Holds for part counts of up to eleven digits.
pub const MAX_PART_LABEL_LEN: usize = 32;

/// Message size limits, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Target chunk size for splitting.
    pub soft: usize,
    /// Ceiling for any single message.
    pub hard: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            soft: 1900,
            hard: 2000,
        }
    }
}

/// Title and channel links shown at the top of the first message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryHeader {
    pub title: String,
    pub url: String,
    pub channel: String,
    pub channel_url: String,
}

impl DeliveryHeader {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        channel: impl Into<String>,
        channel_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            channel: channel.into(),
            channel_url: channel_url.into(),
        }
    }

    /// Header for a fetched video.
    pub fn for_video(meta: &VideoMetadata, url: &str) -> Self {
        Self::new(&meta.title, url, &meta.channel, &meta.channel_url)
    }

    /// Render as markdown links, one per line.
    pub fn render(&self) -> String {
        format!(
            "🎥: [{}]({})\n👦: [{}]({})\n",
            self.title, self.url, self.channel, self.channel_url
        )
    }
}

/// One message to post to the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryMessage {
    /// 1-based position in the sequence.
    pub part: usize,
    /// Number of messages in the sequence.
    pub total: usize,
    /// Full text to post.
    pub content: String,
}

impl DeliveryMessage {
    /// Whether this is the header-bearing first message.
    pub fn is_first(&self) -> bool {
        self.part == 1
    }

    /// Message length in characters.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Lay out `summary` as a sequence of channel messages.
///
/// The summary is split at `limits.soft`. If the header pushes the first
/// message past `limits.hard`, header and summary are split again as one
/// text and that split is used for every message.
pub fn format_messages(
    header: &DeliveryHeader,
    summary: &str,
    limits: Limits,
) -> Result<Vec<DeliveryMessage>> {
    if summary.trim().is_empty() {
        return Err(ClipmindError::InvalidInput(
            "Summary to deliver is empty".to_string(),
        ));
    }

    let lead = format!("{}{}", header.render(), SUMMARY_LABEL);

    let mut chunks = segment(summary, limits.soft);
    let first = format!("{}{}", lead, chunks[0]);
    let first_len = first.chars().count();

    if first_len > limits.hard {
        warn!(
            "First message with header is {} chars (limit {}), re-splitting",
            first_len, limits.hard
        );
        chunks = segment(&format!("{}{}", lead, summary), limits.soft);
    } else {
        chunks[0] = first;
    }

    let total = chunks.len();
    debug!("Formatted summary into {} message(s)", total);

    Ok(chunks
        .into_iter()
        .enumerate()
        .map(|(idx, chunk)| {
            let part = idx + 1;
            let content = if part == 1 {
                chunk
            } else {
                format!("{}{}", part_label(part, total), chunk)
            };
            DeliveryMessage {
                part,
                total,
                content,
            }
        })
        .collect())
}

fn part_label(part: usize, total: usize) -> String {
    format!("📄 Part {}/{}\n", part, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_header() -> DeliveryHeader {
        DeliveryHeader::new("Intro", "u", "Ch", "cu")
    }

    #[test]
    fn test_part_label_fits_reserved_width() {
        assert_eq!(part_label(2, 3), "📄 Part 2/3\n");
        for n in [1, 99, 999_999_999] {
            assert!(part_label(n, n).chars().count() <= MAX_PART_LABEL_LEN);
        }
    }

    #[test]
    fn test_header_render() {
        assert_eq!(short_header().render(), "🎥: [Intro](u)\n👦: [Ch](cu)\n");
    }

    #[test]
    fn test_empty_summary_rejected() {
        let err = format_messages(&short_header(), "  \n", Limits::default()).unwrap_err();
        assert!(matches!(err, ClipmindError::InvalidInput(_)));
    }

    #[test]
    fn test_short_summary_is_single_message() {
        let summary = "s".repeat(1850);
        let messages = format_messages(&short_header(), &summary, Limits::default()).unwrap();

        assert_eq!(messages.len(), 1);
        assert!(messages[0].is_first());
        assert_eq!(
            messages[0].content,
            format!("🎥: [Intro](u)\n👦: [Ch](cu)\n📓: {}", summary)
        );
        assert!(messages[0].len() <= 2000);
    }

    #[test]
    fn test_long_summary_gets_numbered_parts() {
        let summary = "これは要約です。".repeat(625); // 5000 chars
        let messages = format_messages(&short_header(), &summary, Limits::default()).unwrap();

        assert!(messages.len() >= 3);
        assert!(messages[0].len() <= 2000);
        assert!(messages[0].content.starts_with("🎥: [Intro](u)\n"));

        let total = messages.len();
        for (idx, message) in messages.iter().enumerate().skip(1) {
            assert_eq!(message.part, idx + 1);
            assert_eq!(message.total, total);
            assert!(message
                .content
                .starts_with(&format!("📄 Part {}/{}\n", idx + 1, total)));
            assert!(message.len() <= 2000);
        }
    }

    #[test]
    fn test_chunks_reconstruct_summary() {
        let summary = "First point.\nSecond point。".repeat(300);
        let messages = format_messages(&short_header(), &summary, Limits::default()).unwrap();

        let lead = format!("{}{}", short_header().render(), SUMMARY_LABEL);
        let body: String = messages
            .iter()
            .map(|m| {
                if m.is_first() {
                    m.content.strip_prefix(&lead).unwrap().to_string()
                } else {
                    m.content.split_once('\n').unwrap().1.to_string()
                }
            })
            .collect();

        let squash = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        assert_eq!(squash(&body), squash(&summary));
    }

    #[test]
    fn test_long_header_triggers_resplit() {
        let header = DeliveryHeader::new("T".repeat(300), "https://youtu.be/x", "Ch", "cu");
        // Fits the soft limit alone, overflows the hard limit with the header
        let summary = "文".repeat(1850);
        let messages = format_messages(&header, &summary, Limits::default()).unwrap();

        assert!(messages.len() >= 2);
        assert!(messages.iter().all(|m| m.len() <= 2000));
        // No marker in the summary: the cut lands after the header's last newline
        assert_eq!(messages[0].content, header.render().trim());
        assert!(messages[1].content.starts_with(&format!("📄 Part 2/{}\n📓: ", messages.len())));
    }

    #[test]
    fn test_resplit_with_markers_keeps_header_and_text_together() {
        let header = DeliveryHeader::new("T".repeat(300), "https://youtu.be/x", "Ch", "cu");
        let summary = "要点です。".repeat(370); // 1850 chars
        let messages = format_messages(&header, &summary, Limits::default()).unwrap();

        assert!(messages[0].content.starts_with(&header.render()));
        assert!(messages[0].content.contains(SUMMARY_LABEL));
        assert!(messages[0].content.ends_with('。'));
        assert!(messages.iter().all(|m| m.len() <= 2000));
        assert_eq!(messages.last().unwrap().total, messages.len());
    }
}
