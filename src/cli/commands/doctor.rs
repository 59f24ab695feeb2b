//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::{truncate_url, Settings, ENV_WEBHOOK_URL};
use console::style;
use std::path::Path;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

fn print_section(title: &str, checks: &[CheckResult]) {
    println!("{}", style(title).bold());
    for check in checks {
        check.print();
    }
    println!();
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Clipmind Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    let tools = vec![
        check_tool("yt-dlp", "--version", install_hint_ytdlp()),
        check_tool("ffmpeg", "-version", install_hint_ffmpeg()),
        check_file(
            "whisper-cli",
            &settings.whisper_binary(),
            "Build whisper.cpp and set WHISPER_BIN to build/bin/whisper-cli",
        ),
        check_file(
            "Whisper model",
            &settings.whisper_model(),
            "Download a ggml model (models/download-ggml-model.sh) and set WHISPER_MODEL",
        ),
    ];
    print_section("Transcription", &tools);
    checks.extend(tools);

    let services = vec![check_completion(settings), check_webhook(settings)];
    print_section("Services", &services);
    checks.extend(services);

    let config = vec![check_outroot(settings), check_config_file(), check_limits(settings)];
    print_section("Configuration", &config);
    checks.extend(config);

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before running the pipeline.",
            errors
        ));
        anyhow::bail!("doctor found {} error(s)", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Clipmind is ready to use.");
    }

    Ok(())
}

/// Check if an external tool on PATH is available.
fn check_tool(name: &str, version_arg: &str, hint: &str) -> CheckResult {
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();

            let version_display = if version.chars().count() > 50 {
                format!("{}...", version.chars().take(50).collect::<String>())
            } else {
                version
            };

            CheckResult::ok(name, &version_display)
        }
        Ok(_) => CheckResult::error(name, "installed but not working", hint),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::error(name, "not found", hint)
        }
        Err(e) => CheckResult::error(name, &format!("error: {}", e), hint),
    }
}

/// Check that a configured file exists.
fn check_file(name: &str, path: &Path, hint: &str) -> CheckResult {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => CheckResult::ok(
            name,
            &format!("{} ({})", path.display(), format_size(meta.len())),
        ),
        Ok(_) => CheckResult::error(name, &format!("{} is not a file", path.display()), hint),
        Err(_) => CheckResult::error(name, &format!("{} not found", path.display()), hint),
    }
}

fn check_completion(settings: &Settings) -> CheckResult {
    let completion = &settings.completion;
    match url::Url::parse(&completion.base_url) {
        Ok(_) => CheckResult::ok(
            "Completion service",
            &format!("{} (model {})", completion.base_url, completion.model),
        ),
        Err(e) => CheckResult::error(
            "Completion service",
            &format!("invalid base URL '{}': {}", completion.base_url, e),
            "Set BASE_URL to an OpenAI-compatible endpoint, e.g. http://localhost:1234/v1",
        ),
    }
}

fn check_webhook(settings: &Settings) -> CheckResult {
    let hint = format!("Set {} in the environment or .env", ENV_WEBHOOK_URL);
    match settings.delivery.webhook_url.as_deref() {
        Some(url) if url::Url::parse(url).is_ok() => {
            CheckResult::ok("Webhook", &truncate_url(url))
        }
        Some(_) => CheckResult::error("Webhook", "invalid URL", &hint),
        None => CheckResult::error("Webhook", "not configured", &hint),
    }
}

fn check_limits(settings: &Settings) -> CheckResult {
    match settings.validate() {
        Ok(()) => CheckResult::ok(
            "Message limits",
            &format!(
                "soft {} / hard {}",
                settings.delivery.soft_limit, settings.delivery.hard_limit
            ),
        ),
        Err(e) => CheckResult::error("Settings", &e.to_string(), "Fix the [delivery] section"),
    }
}

fn check_outroot(settings: &Settings) -> CheckResult {
    let outroot = settings.outroot();
    if outroot.exists() {
        CheckResult::ok("Output root", &format!("{}", outroot.display()))
    } else {
        CheckResult::warning(
            "Output root",
            &format!("{} (will be created)", outroot.display()),
            "Directory will be created on first run",
        )
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults and environment",
            "Optional: create it to persist settings (clipmind config path)",
        )
    }
}

/// Format file size in human-readable format.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}

/// Platform-specific install hint for ffmpeg (used by yt-dlp for WAV extraction).
fn install_hint_ffmpeg() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install ffmpeg"
    } else if cfg!(target_os = "linux") {
        "Install with: sudo apt install ffmpeg (or your package manager)"
    } else {
        "Install from: https://ffmpeg.org/download.html"
    }
}
