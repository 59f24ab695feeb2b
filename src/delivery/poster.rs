//! Posting messages to the channel webhook.

use super::format::DeliveryMessage;
use crate::config::truncate_url;
use crate::error::{ClipmindError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Destination for formatted messages.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Post one message. Succeeds only if the endpoint accepted it.
    async fn post_message(&self, content: &str) -> Result<()>;
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Posts messages to a Discord-style webhook as `{"content": ...}`.
pub struct WebhookPoster {
    client: reqwest::Client,
    webhook_url: String,
}

impl WebhookPoster {
    /// Create a poster with the given request timeout.
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClipmindError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
        })
    }
}

#[async_trait]
impl MessageSink for WebhookPoster {
    #[instrument(skip_all, fields(webhook = %truncate_url(&self.webhook_url), len = content.chars().count()))]
    async fn post_message(&self, content: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&WebhookPayload { content })
            .send()
            .await
            .map_err(|e| ClipmindError::Upstream(format!("Webhook request failed: {}", e)))?;

        let status = response.status();
        debug!("Webhook responded with {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClipmindError::Upstream(format!(
                "Webhook rejected message ({}): {}",
                status,
                body.trim()
            )));
        }

        Ok(())
    }
}

/// A part message that could not be delivered.
#[derive(Debug)]
pub struct PartFailure {
    /// 1-based part number.
    pub part: usize,
    pub error: ClipmindError,
}

/// Outcome of delivering a message sequence whose first message succeeded.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    /// Messages attempted, including the first.
    pub attempted: usize,
    /// Messages accepted by the endpoint.
    pub delivered: usize,
    /// Part messages that failed, in order.
    pub failures: Vec<PartFailure>,
}

impl DeliveryReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Post `messages` in order, one request each.
///
/// A failed first message fails the whole delivery and nothing else is sent.
/// A failed later part is logged and recorded in the report, and the
/// remaining parts are still attempted. Nothing is retried.
pub async fn deliver(sink: &dyn MessageSink, messages: &[DeliveryMessage]) -> Result<DeliveryReport> {
    let mut report = DeliveryReport::default();

    let Some((first, parts)) = messages.split_first() else {
        return Ok(report);
    };

    report.attempted += 1;
    sink.post_message(&first.content).await.map_err(|e| {
        error!("Failed to post first message: {}", e);
        e
    })?;
    report.delivered += 1;
    info!("First message delivered");

    if parts.is_empty() {
        debug!("Single-part message only");
        return Ok(report);
    }

    for message in parts {
        report.attempted += 1;
        match sink.post_message(&message.content).await {
            Ok(()) => {
                report.delivered += 1;
                info!("Part {}/{} delivered", message.part, message.total);
            }
            Err(e) => {
                warn!("Part {}/{} failed: {}", message.part, message.total, e);
                report.failures.push(PartFailure {
                    part: message.part,
                    error: e,
                });
            }
        }
    }

    Ok(report)
}
