//! Live integration test for the CertStream client.
//!
//! This test connects to the public certstream endpoint and is enabled with
//! the `live-tests` feature flag.
//!
//! To run this test:
//! `cargo test --test live_certstream_client --features live-tests -- --nocapture`

#![cfg(feature = "live-tests")]

use ctwatch::core::MessageKind;
use ctwatch::network::CertStreamClient;
use std::time::Duration;

#[tokio::test]
async fn test_live_feed_yields_events() {
    let client = CertStreamClient::default();
    let mut connection = client.connect().await.expect("could not connect to certstream");

    let result = tokio::time::timeout(Duration::from_secs(60), async {
        for _ in 0..50 {
            let event = connection.next_event().await.expect("feed error");
            if event.kind() == MessageKind::CertificateUpdate {
                return event.all_domains().expect("certificate without domains");
            }
        }
        panic!("no certificate update within 50 events");
    })
    .await
    .expect("timed out waiting for a certificate update");

    println!("Received certificate for {:?}", result);
}
