// src/formatting.rs

use crate::core::{MatchResult, Notification};

/// Base URL of the public certificate search used for lookup links.
pub const CRT_SH_URL: &str = "https://crt.sh/?q=";

/// A trait for turning a match into the text of a chat message.
pub trait TextFormatter: Send + Sync {
    fn format(&self, result: &MatchResult, fingerprint: &str) -> Notification;
}

/// A formatter producing Slack mrkdwn text.
pub struct SlackTextFormatter;

impl TextFormatter for SlackTextFormatter {
    fn format(&self, result: &MatchResult, fingerprint: &str) -> Notification {
        let text = format!(
            "Found matching certificate for {}: {}",
            word_series(&result.entries(), "and"),
            crt_sh_url(fingerprint)
        );
        Notification {
            text,
            fingerprint: fingerprint.to_string(),
        }
    }
}

/// Builds the crt.sh lookup URL for a colon-separated fingerprint.
pub fn crt_sh_url(fingerprint: &str) -> String {
    format!("{}{}", CRT_SH_URL, fingerprint.replace(':', ""))
}

/// Joins words into an English series with a serial comma:
/// `a`, `a and b`, `a, b, and c`.
pub fn word_series<S: AsRef<str>>(words: &[S], conjunction: &str) -> String {
    match words {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} {} {}", first.as_ref(), conjunction, second.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|word| word.as_ref()).collect();
            format!("{}, {} {}", head.join(", "), conjunction, last.as_ref())
        }
    }
}
