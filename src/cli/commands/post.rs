//! Post command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{truncate_url, Settings};
use crate::delivery::{
    deliver, format_messages, DeliveryHeader, DeliveryReport, Limits, WebhookPoster,
};
use anyhow::Result;

/// Format `summary` under `header` and post it to the configured webhook.
pub async fn run_post(
    header: DeliveryHeader,
    summary: &str,
    webhook: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    if webhook.is_some() {
        settings.delivery.webhook_url = webhook;
    }
    preflight::check(Operation::Post, &settings)?;
    let webhook_url = settings.require_webhook()?;

    tracing::info!("Posting to {}", truncate_url(webhook_url));

    let limits = Limits {
        soft: settings.delivery.soft_limit,
        hard: settings.delivery.hard_limit,
    };
    let messages = format_messages(&header, summary, limits)?;
    Output::info(&format!("Posting {} message(s)...", messages.len()));

    let poster = WebhookPoster::new(webhook_url, settings.delivery_timeout())?;
    let report = deliver(&poster, &messages).await?;
    finish_delivery(&report)
}

/// Report undelivered parts and fail the command if there were any.
///
/// Only called once every part has been attempted.
pub(super) fn finish_delivery(report: &DeliveryReport) -> Result<()> {
    report.failures.iter().for_each(Output::part_failure);
    if !report.is_complete() {
        anyhow::bail!(
            "{} of {} message(s) failed to deliver",
            report.failures.len(),
            report.attempted
        );
    }

    Output::success(&format!("Posted {} message(s)", report.delivered));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::PartFailure;
    use crate::error::ClipmindError;

    #[test]
    fn test_complete_delivery_succeeds() {
        let report = DeliveryReport {
            attempted: 3,
            delivered: 3,
            failures: Vec::new(),
        };
        assert!(finish_delivery(&report).is_ok());
    }

    #[test]
    fn test_failed_part_fails_command() {
        let report = DeliveryReport {
            attempted: 3,
            delivered: 2,
            failures: vec![PartFailure {
                part: 2,
                error: ClipmindError::Upstream("webhook returned 500".to_string()),
            }],
        };
        let err = finish_delivery(&report).unwrap_err();
        assert_eq!(err.to_string(), "1 of 3 message(s) failed to deliver");
    }
}
