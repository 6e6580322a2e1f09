//! A mock notifier that records every notification it is asked to send.

use async_trait::async_trait;
use ctwatch::core::{Notification, Notifier};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Default)]
pub struct MockSlackClient {
    pub sent: Arc<Mutex<Vec<Notification>>>,
    pub fail: bool,
}

impl MockSlackClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose every delivery fails after being recorded.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.text.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for MockSlackClient {
    fn name(&self) -> &str {
        "mock_slack"
    }

    async fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(notification.clone());
        if self.fail {
            anyhow::bail!("mock delivery failure");
        }
        Ok(())
    }
}
