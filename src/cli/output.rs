//! CLI output formatting utilities.
//!
//! Everything goes to stderr except headers and key/value lines, which form
//! the command's result and go to stdout.

use crate::delivery::PartFailure;
use crate::media::VideoMetadata;
use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    pub fn info(msg: &str) {
        status(style(">>").cyan(), msg);
    }

    pub fn success(msg: &str) {
        status(style(">>").green(), msg);
    }

    pub fn warning(msg: &str) {
        status(style(">>").yellow(), msg);
    }

    pub fn error(msg: &str) {
        status(style(">>").red(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print the title line for a processed video.
    pub fn video(meta: &VideoMetadata) {
        Self::header(&meta.title);
        let mut line = meta.channel.clone();
        if let Some(seconds) = meta.duration_seconds {
            line.push_str(&format!(", {}", format_duration(seconds)));
        }
        if let Some(date) = meta.upload_date {
            line.push_str(&format!(", {}", date.format("%Y-%m-%d")));
        }
        println!("  {}", style(line).dim());
    }

    /// Print one undelivered message part.
    pub fn part_failure(failure: &PartFailure) {
        Self::warning(&format!(
            "Part {} not delivered: {}",
            failure.part, failure.error
        ));
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

fn status(marker: StyledObject<&str>, msg: &str) {
    eprintln!("{} {}", marker.bold(), msg);
}

/// Format a duration in seconds as e.g. `1h 2m 3s`.
fn format_duration(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3723), "1h 2m 3s");
    }
}
