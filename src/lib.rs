//! ctwatch - a certificate transparency watcher
//!
//! This library provides the feed client, the domain matcher, and the Slack
//! notifier that make up the watch pipeline.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod formatting;
pub mod matching;
pub mod network;
pub mod notification;

// Re-export core types for convenience
pub use crate::core::{FeedEvent, MatchResult, MessageKind, Notification, Notifier};
