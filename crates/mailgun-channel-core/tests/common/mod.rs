//! Common test utilities and helpers for integration tests
#![allow(dead_code)]

use mailgun_channel_core::models::InboundRequest;
use std::path::PathBuf;

pub mod test_data;

/// Get path to test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Load a webhook JSON fixture
pub fn load_webhook_fixture(name: &str) -> String {
    let path = fixtures_dir().join("webhooks").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read fixture: {:?}", path))
}

/// Inbound request routed to the Mailgun email adaptor
pub fn mailgun_request() -> InboundRequest {
    InboundRequest::new()
        .with_query("channel-id", "Email")
        .with_query("channel-provider-id", "Mailgun")
}

/// Inbound request carrying a webhook fixture as its body
pub fn mailgun_fixture_request(name: &str) -> InboundRequest {
    mailgun_request()
        .with_header("content-type", "application/json")
        .with_content(load_webhook_fixture(name))
}
