/*
[INPUT]:  Authenticated profile
[OUTPUT]: Linked Coinbase wallet accounts
[POS]:    HTTP layer - coinbase account endpoints (signed)
[UPDATE]: When the coinbase-accounts schema changes
*/

use reqwest::Method;

use crate::http::{GdaxClient, Paginated};
use crate::types::CoinbaseAccount;

impl GdaxClient {
    /// Lazily list the Coinbase wallets linked to this profile
    ///
    /// GET /coinbase-accounts — single response, no pagination cursors
    pub fn list_coinbase_accounts(&self) -> Paginated<'_, CoinbaseAccount> {
        Paginated::new(self, Method::GET, "/coinbase-accounts", "", "", false)
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, Credentials, GdaxClient};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GdaxClient {
        let credentials = Credentials {
            key: "test-key".to_string(),
            secret: "c3VwZXItc2VjcmV0LWtleQ==".to_string(),
            passphrase: "test-passphrase".to_string(),
        };
        GdaxClient::with_config_and_base_url(ClientConfig::default(), base_url, credentials)
            .expect("client init")
    }

    #[tokio::test]
    async fn test_list_coinbase_accounts() {
        let server = MockServer::start().await;
        let mock_response = r#"
            [
                {
                    "id": "fc3a8a57-7142-542d-8436-95a3d82e1622",
                    "name": "ETH Wallet",
                    "balance": "0.00000000",
                    "currency": "ETH",
                    "type": "wallet",
                    "primary": false,
                    "active": true
                },
                {
                    "id": "2ae3354e-f1c3-5771-8a37-6228e9d239db",
                    "name": "USD Wallet",
                    "balance": "0.00",
                    "currency": "USD",
                    "type": "fiat",
                    "primary": false,
                    "active": true
                }
            ]
        "#;

        Mock::given(method("GET"))
            .and(path("/coinbase-accounts"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let wallets = client
            .list_coinbase_accounts()
            .collect_all()
            .await
            .expect("list_coinbase_accounts failed");

        assert_eq!(wallets.len(), 2);
        assert_eq!(wallets[0].name, "ETH Wallet");
        assert_eq!(wallets[0].account_type, "wallet");
        assert_eq!(wallets[1].account_type, "fiat");
    }
}
