//! The main watch loop, decoupled from the entry point.

use crate::{
    config::Config,
    core::{FeedEvent, MessageKind, Notification, Notifier},
    formatting::{SlackTextFormatter, TextFormatter},
    matching::DomainMatcher,
    network::{CertStreamClient, FeedConnection, FeedError, WebSocketConnection},
    notification::slack::SlackClient,
};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, trace};

/// What happened to a single feed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not a certificate update.
    Ignored(MessageKind),
    /// The domain list could not be read from the event.
    Malformed,
    /// No domain matched the pattern.
    NoMatch,
    /// A notification was delivered.
    Notified,
    /// A notification was built but delivery failed.
    DeliveryFailed,
}

/// The running watcher: one feed connection, one pattern, one sink.
pub struct App {
    matcher: DomainMatcher,
    formatter: Box<dyn TextFormatter>,
    notifier: Arc<dyn Notifier>,
    client: CertStreamClient,
    websocket_override: Option<Box<dyn WebSocketConnection>>,
}

impl App {
    /// Creates a new `AppBuilder` to construct an `App`.
    pub fn builder(config: Config) -> AppBuilder {
        AppBuilder::new(config)
    }

    /// Connects to the feed and processes events until a fatal feed error.
    ///
    /// Events are handled strictly one at a time: the next read is only
    /// issued once the previous event, including its delivery, is done.
    pub async fn run(mut self) -> Result<(), FeedError> {
        let mut connection = match self.websocket_override.take() {
            Some(ws) => FeedConnection::new(ws),
            None => self.client.connect().await?,
        };

        info!(domain_pattern = %self.matcher.pattern(), "Watching for certificates");
        loop {
            let event = connection.next_event().await?;
            self.handle_event(&event).await;
        }
    }

    /// Runs one event through classify, match, format, and send.
    pub async fn handle_event(&self, event: &FeedEvent) -> Outcome {
        let kind = event.kind();
        if kind != MessageKind::CertificateUpdate {
            trace!(?kind, "Skipping non-certificate event");
            return Outcome::Ignored(kind);
        }

        let domains = match event.all_domains() {
            Ok(domains) => domains,
            Err(e) => {
                error!(error = %e, "couldn't get domains");
                return Outcome::Malformed;
            }
        };

        let result = self.matcher.match_domains(&domains);
        if result.is_empty() {
            trace!(count = domains.len(), "No matching domains");
            return Outcome::NoMatch;
        }

        // A missing fingerprint still produces a notification, with an
        // unusable lookup link.
        let fingerprint = event.fingerprint().unwrap_or_else(|e| {
            error!(error = %e, "could not parse fingerprint from matching certificate");
            String::new()
        });

        let notification = self.formatter.format(&result, &fingerprint);
        debug!(domains = ?result.domains, others = result.others, "Matched certificate");
        self.deliver(&notification).await
    }

    async fn deliver(&self, notification: &Notification) -> Outcome {
        match self.notifier.send(notification).await {
            Ok(()) => {
                info!(notifier = self.notifier.name(), "Sent notification");
                Outcome::Notified
            }
            Err(e) => {
                error!(
                    error = %e,
                    fingerprint = %notification.fingerprint,
                    "error sending webhook"
                );
                Outcome::DeliveryFailed
            }
        }
    }
}

/// Builder for the watcher.
///
/// Production code only supplies a `Config`; tests swap in a scripted feed
/// connection or a recording notifier.
pub struct AppBuilder {
    config: Config,
    websocket_override: Option<Box<dyn WebSocketConnection>>,
    notifier_override: Option<Arc<dyn Notifier>>,
    formatter_override: Option<Box<dyn TextFormatter>>,
}

impl AppBuilder {
    /// Creates a new `AppBuilder` with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            websocket_override: None,
            notifier_override: None,
            formatter_override: None,
        }
    }

    /// Overrides the WebSocket connection for testing.
    pub fn websocket_override(mut self, ws: Box<dyn WebSocketConnection>) -> Self {
        self.websocket_override = Some(ws);
        self
    }

    /// Overrides the notification sink for testing.
    pub fn notifier_override(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier_override = Some(notifier);
        self
    }

    /// Overrides the message formatter.
    pub fn formatter_override(mut self, formatter: Box<dyn TextFormatter>) -> Self {
        self.formatter_override = Some(formatter);
        self
    }

    /// Compiles the pattern and creates the notifier.
    pub fn build(self) -> Result<App> {
        let matcher = self.config.matcher()?;

        let notifier: Arc<dyn Notifier> = match self.notifier_override {
            Some(notifier) => notifier,
            None => Arc::new(SlackClient::with_timeout(
                self.config.slack_webhook_url.clone(),
                Duration::from_secs(self.config.slack_timeout_seconds),
            )?),
        };

        Ok(App {
            matcher,
            formatter: self
                .formatter_override
                .unwrap_or_else(|| Box::new(SlackTextFormatter)),
            notifier,
            client: CertStreamClient::default(),
            websocket_override: self.websocket_override,
        })
    }
}
