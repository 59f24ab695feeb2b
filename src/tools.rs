//! External tool invocation.
//!
//! yt-dlp and whisper-cli are run as child processes. Output is captured so
//! that a failing tool's stderr ends up in the error message.

use crate::error::{ClipmindError, Result};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Run a command to completion and return its captured output.
///
/// A launch failure maps to [`ClipmindError::ToolNotFound`] when the binary
/// does not exist, and a non-zero exit to [`ClipmindError::ExternalProcess`]
/// carrying the tool's stderr. With a `timeout`, the child is killed once it
/// elapses.
pub async fn run_tool(tool: &str, mut command: Command, timeout: Option<Duration>) -> Result<Output> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!("Running {}: {:?}", tool, command.as_std());

    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, command.output())
            .await
            .map_err(|_| {
                ClipmindError::process(tool, format!("timed out after {}s", limit.as_secs()))
            })?,
        None => command.output().await,
    };

    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ClipmindError::ToolNotFound(tool.to_string()));
        }
        Err(e) => {
            return Err(ClipmindError::process(tool, format!("execution failed: {e}")));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ClipmindError::process(
            tool,
            format!("exited with {}: {}", output.status, stderr.trim()),
        ));
    }

    Ok(output)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_tool_not_found() {
        let command = Command::new("clipmind-definitely-not-installed");
        let err = run_tool("clipmind-definitely-not-installed", command, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClipmindError::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_stderr() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo boom >&2; exit 3"]);
        let err = run_tool("sh", command, None).await.unwrap_err();
        match err {
            ClipmindError::ExternalProcess { tool, message } => {
                assert_eq!(tool, "sh");
                assert!(message.contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_external_process_error() {
        let mut command = Command::new("sh");
        command.args(["-c", "sleep 5"]);
        let err = run_tool("sh", command, Some(Duration::from_millis(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, ClipmindError::ExternalProcess { .. }));
    }

    #[tokio::test]
    async fn test_success_returns_stdout() {
        let mut command = Command::new("sh");
        command.args(["-c", "printf hello"]);
        let output = run_tool("sh", command, None).await.unwrap();
        assert_eq!(output.stdout, b"hello");
    }
}
