#![allow(dead_code)]
pub mod logs;
pub mod mock_slack;
pub mod mock_ws;

use ctwatch::config::Config;

/// A valid configuration pointing at `webhook_url`.
pub fn test_config(domain_pattern: &str, webhook_url: &str) -> Config {
    Config {
        slack_webhook_url: webhook_url.to_string(),
        domain_pattern: domain_pattern.to_string(),
        ..Config::default()
    }
}

/// A certstream `certificate_update` message.
pub fn certificate_update(domains: &[&str], fingerprint: &str) -> String {
    serde_json::json!({
        "message_type": "certificate_update",
        "data": {
            "update_type": "X509LogEntry",
            "leaf_cert": {
                "subject": { "CN": domains.first().copied().unwrap_or_default() },
                "all_domains": domains,
                "fingerprint": fingerprint,
            },
            "chain": [],
            "cert_index": 12345,
            "seen": 1234567890.123,
            "source": {
                "url": "ct.googleapis.com/logs/argon2023/",
                "name": "Google 'Argon2023' log"
            }
        }
    })
    .to_string()
}

/// A certstream keep-alive message.
pub fn heartbeat() -> String {
    r#"{"message_type": "heartbeat", "timestamp": 1700000000.0}"#.to_string()
}
