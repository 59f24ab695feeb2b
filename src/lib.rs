//! Clipmind - video to translated channel summary
//!
//! Turns a video URL into a Japanese summary posted to a Discord channel.
//!
//! # Overview
//!
//! A run goes through these stages:
//! - Fetch metadata and download the audio track with yt-dlp
//! - Transcribe the audio locally with whisper.cpp
//! - Summarize the transcript with an OpenAI-compatible model
//! - Translate the summary into Japanese
//! - Persist the artifacts under `<outroot>/<channel>/<title>/`
//! - Split the translation into channel-sized messages and post them
//!
//! # Architecture
//!
//! - `config` - Settings, environment overrides and prompt templates
//! - `media` - Video metadata and audio download
//! - `transcription` - Speech-to-text
//! - `completion` - Summarization and translation
//! - `delivery` - Message segmentation, formatting and webhook posting
//! - `artifacts` - Output directory layout and run metadata
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use clipmind::config::Settings;
//! use clipmind::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load_from(None)?;
//!     let orchestrator = Orchestrator::new(&settings)?;
//!
//!     let outcome = orchestrator.run("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await?;
//!     println!("Posted {} message(s)", outcome.delivery.delivered);
//!
//!     Ok(())
//! }
//! ```

pub mod artifacts;
pub mod cli;
pub mod completion;
pub mod config;
pub mod delivery;
pub mod error;
pub mod media;
pub mod openai;
pub mod orchestrator;
pub mod tools;
pub mod transcription;

pub use error::{ClipmindError, Result};
