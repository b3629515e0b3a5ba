/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for gdax-adapter tests

use gdax_adapter::{ClientConfig, Credentials, GdaxClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Credentials with a base64 secret accepted by the signer
pub fn test_credentials() -> Credentials {
    Credentials {
        key: "test-key".to_string(),
        // base64 of "super-secret-key"
        secret: "c3VwZXItc2VjcmV0LWtleQ==".to_string(),
        passphrase: "test-passphrase".to_string(),
    }
}

/// A client pointed at the given mock server
pub fn test_client(base_url: &str) -> GdaxClient {
    GdaxClient::with_config_and_base_url(ClientConfig::default(), base_url, test_credentials())
        .expect("client init")
}

/// One account-history ledger entry with the given id
#[allow(dead_code)]
pub fn history_entry(id: i64) -> String {
    format!(
        r#"{{
            "id": {id},
            "created_at": "2014-11-07T08:19:27.028459Z",
            "amount": "0.001",
            "balance": "239.669",
            "type": "fee",
            "details": {{
                "order_id": "d50ec984-77a8-460a-b958-66f114b0de9b",
                "trade_id": "74",
                "product_id": "BTC-USD"
            }}
        }}"#
    )
}
