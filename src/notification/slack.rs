//! A client for sending notifications to a Slack incoming webhook.

use crate::core::{Notification, Notifier};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Default timeout for a single webhook request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP request to Slack failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Slack webhook returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// A client for posting messages to a Slack webhook.
pub struct SlackClient {
    webhook_url: String,
    client: reqwest::Client,
}

impl SlackClient {
    /// Creates a new `SlackClient` with the default request timeout.
    pub fn new(webhook_url: String) -> Result<Self, NotifyError> {
        Self::with_timeout(webhook_url, DEFAULT_TIMEOUT)
    }

    /// Creates a new `SlackClient` whose requests give up after `timeout`.
    pub fn with_timeout(webhook_url: String, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            webhook_url,
            client,
        })
    }

    /// Posts `text` to the webhook once.
    pub async fn post_text(&self, text: &str) -> Result<(), NotifyError> {
        let payload = json!({ "text": text });
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Successfully sent message to Slack.");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!(
                status = %status,
                body = %body,
                "Slack rejected the notification"
            );
            Err(NotifyError::Status { status, body })
        }
    }
}

#[async_trait]
impl Notifier for SlackClient {
    fn name(&self) -> &str {
        "slack"
    }

    #[instrument(skip_all, fields(fingerprint = %notification.fingerprint))]
    async fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        self.post_text(&notification.text).await?;
        Ok(())
    }
}
