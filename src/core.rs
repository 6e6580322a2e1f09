//! Core domain types and service traits for ctwatch
//!
//! This module defines the typed model of a certstream event, the values
//! that flow between pipeline stages, and the trait contract for delivery.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// The `message_type` discriminator of a certificate issuance event.
pub const CERTIFICATE_UPDATE: &str = "certificate_update";

/// The `message_type` discriminator of a feed keep-alive.
pub const HEARTBEAT: &str = "heartbeat";

/// Errors raised while pulling a field out of a decoded event.
///
/// These are per-message failures: the caller logs them and moves on.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("malformed field `{field}`: {source}")]
    Malformed {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// The kind of an event, as read from its `message_type` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    CertificateUpdate,
    Heartbeat,
    Other(String),
    /// `message_type` is absent or not a string.
    Missing,
}

/// One decoded message from the certificate feed.
///
/// Only `message_type` is read eagerly. Certificate fields are extracted on
/// demand so that an event with a malformed certificate still decodes, and
/// the failure stays local to that event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedEvent {
    #[serde(default)]
    message_type: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
}

impl FeedEvent {
    /// Decodes a raw feed payload.
    ///
    /// Any syntactically valid JSON document is accepted; a payload that is
    /// not an object decodes to an event without a `message_type`.
    pub fn decode(payload: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(payload)?;
        match value {
            Value::Object(_) => serde_json::from_value(value),
            _ => Ok(Self::default()),
        }
    }

    /// Classifies the event by its `message_type`.
    pub fn kind(&self) -> MessageKind {
        match self.message_type.as_ref().and_then(Value::as_str) {
            Some(CERTIFICATE_UPDATE) => MessageKind::CertificateUpdate,
            Some(HEARTBEAT) => MessageKind::Heartbeat,
            Some(other) => MessageKind::Other(other.to_string()),
            None => MessageKind::Missing,
        }
    }

    /// Every domain named in the leaf certificate (CN and SANs), in feed order.
    pub fn all_domains(&self) -> Result<Vec<String>, ExtractError> {
        let value = self.leaf_cert_field("all_domains")?;
        Vec::<String>::deserialize(value).map_err(|source| ExtractError::Malformed {
            field: "all_domains",
            source,
        })
    }

    /// The leaf certificate's fingerprint, e.g. `AA:BB:CC:...`.
    pub fn fingerprint(&self) -> Result<String, ExtractError> {
        let value = self.leaf_cert_field("fingerprint")?;
        String::deserialize(value).map_err(|source| ExtractError::Malformed {
            field: "fingerprint",
            source,
        })
    }

    fn leaf_cert_field(&self, field: &'static str) -> Result<&Value, ExtractError> {
        let data = self
            .data
            .as_ref()
            .ok_or(ExtractError::MissingField("data"))?;
        let leaf_cert = data
            .get("leaf_cert")
            .ok_or(ExtractError::MissingField("leaf_cert"))?;
        leaf_cert.get(field).ok_or(ExtractError::MissingField(field))
    }
}

/// The domains of one certificate that matched the configured pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchResult {
    /// Matching domains wrapped in backticks, sorted.
    pub domains: Vec<String>,
    /// How many domains of the certificate did not match.
    pub others: usize,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// The domains followed by an `"N others"` entry when some did not match.
    pub fn entries(&self) -> Vec<String> {
        let mut entries = self.domains.clone();
        if self.others > 0 {
            entries.push(format!("{} others", self.others));
        }
        entries
    }
}

/// A single outbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The message body.
    pub text: String,
    /// The certificate fingerprint, kept for log correlation.
    pub fingerprint: String,
}

// =============================================================================
// Service Traits
// =============================================================================

/// Delivers notifications to a chat sink.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A short name for logs (e.g., "slack").
    fn name(&self) -> &str;

    /// Makes exactly one delivery attempt.
    async fn send(&self, notification: &Notification) -> anyhow::Result<()>;
}
