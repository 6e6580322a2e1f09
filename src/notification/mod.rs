//! Delivery of notifications to the chat sink.
//!
//! The watch loop only sees the `Notifier` trait from `core`; `slack`
//! provides the webhook-backed implementation.
pub mod slack;
