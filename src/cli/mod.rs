//! CLI module for Clipmind.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Clipmind - video to translated channel summary
///
/// Downloads a video's audio, transcribes it with whisper.cpp, summarizes and
/// translates it with a language model, and posts the result to a chat channel.
#[derive(Parser, Debug)]
#[command(name = "clipmind")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline for a video URL
    Run {
        /// Video URL
        url: String,

        /// Output root directory (overrides OUTROOT)
        #[arg(long)]
        outroot: Option<String>,

        /// Path to whisper-cli (overrides WHISPER_BIN)
        #[arg(long)]
        whisper_bin: Option<String>,

        /// Path to the whisper model (overrides WHISPER_MODEL)
        #[arg(long)]
        whisper_model: Option<String>,

        /// Webhook URL (overrides DISCORD_WEBHOOK_URL)
        #[arg(long)]
        webhook: Option<String>,
    },

    /// Summarize a transcript file into <stem>_summary.txt
    Summarize {
        /// Transcript text file
        file: PathBuf,
    },

    /// Translate a summary file into <stem>_ja.txt
    Translate {
        /// Summary text file
        file: PathBuf,
    },

    /// Post a summary to the channel
    Post {
        /// Video title
        title: String,

        /// Video URL
        url: String,

        /// Channel name
        channel: String,

        /// Channel URL
        channel_url: String,

        /// Summary text
        summary: String,

        /// Webhook URL (overrides DISCORD_WEBHOOK_URL)
        #[arg(long)]
        webhook: Option<String>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration (secrets masked)
    Show,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = Cli::parse_from([
            "clipmind",
            "-v",
            "run",
            "https://youtu.be/abc",
            "--outroot",
            "/tmp/out",
            "--webhook",
            "https://discord.com/api/webhooks/1/x",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Run { url, outroot, webhook, whisper_bin, .. } => {
                assert_eq!(url, "https://youtu.be/abc");
                assert_eq!(outroot.as_deref(), Some("/tmp/out"));
                assert_eq!(webhook.as_deref(), Some("https://discord.com/api/webhooks/1/x"));
                assert!(whisper_bin.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_post() {
        let cli = Cli::parse_from(["clipmind", "post", "T", "u", "C", "cu", "本文"]);
        assert!(matches!(cli.command, Commands::Post { ref summary, .. } if summary == "本文"));
    }
}
