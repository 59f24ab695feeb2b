//! Error types for Clipmind.

use crate::orchestrator::Stage;
use std::path::PathBuf;
use thiserror::Error;

/// Library-level error type for Clipmind operations.
#[derive(Error, Debug)]
pub enum ClipmindError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{tool} failed: {message}")]
    ExternalProcess { tool: String, message: String },

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("Expected artifact not found: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Pipeline failed during {stage}: {source}")]
    StageFailed {
        stage: Stage,
        #[source]
        source: Box<ClipmindError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl ClipmindError {
    /// Shorthand for a failed external tool invocation.
    pub fn process(tool: impl Into<String>, message: impl Into<String>) -> Self {
        ClipmindError::ExternalProcess {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// The error that caused a stage failure, or `self` for any other error.
    pub fn root_cause(&self) -> &ClipmindError {
        match self {
            ClipmindError::StageFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for Clipmind operations.
pub type Result<T> = std::result::Result<T, ClipmindError>;
