/*
[INPUT]:  HTTP configuration (base URL, timeouts, credentials)
[OUTPUT]: Configured reqwest client ready for signed API calls
[POS]:    HTTP layer - core client implementation and transport
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::http::pagination::Cursor;
use crate::http::signature::RequestSigner;
use crate::http::{GdaxError, Result};

/// Base URL for the exchange REST API (sandbox)
const API_BASE_URL: &str = "https://api-public.sandbox.gdax.com";

const ENV_KEY: &str = "PUBLIC_KEY";
const ENV_SECRET: &str = "PRIVATE_KEY";
const ENV_PASSPHRASE: &str = "PASSPHRASE";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Credentials for authenticated requests.
///
/// The JSON field names match the credentials file layout:
/// `{"public_api": ..., "private_api": ..., "passphrase": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(rename = "public_api")]
    pub key: String,
    #[serde(rename = "private_api")]
    pub secret: String,
    pub passphrase: String,
}

impl Credentials {
    /// Load credentials from the PUBLIC_KEY / PRIVATE_KEY / PASSPHRASE
    /// environment variables
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name)
                .map_err(|_| GdaxError::Config(format!("missing environment variable {name}")))
        };
        Ok(Self {
            key: var(ENV_KEY)?,
            secret: var(ENV_SECRET)?,
            passphrase: var(ENV_PASSPHRASE)?,
        })
    }

    /// Load credentials from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref()).map_err(|err| {
            GdaxError::Config(format!(
                "cannot read credentials file {}: {err}",
                path.as_ref().display()
            ))
        })?;
        serde_json::from_str(&data)
            .map_err(|err| GdaxError::Config(format!("malformed credentials file: {err}")))
    }
}

/// Main HTTP client for the exchange REST API.
///
/// Cheap to share by reference: all state is read-only after construction
/// and the underlying reqwest client is safe for concurrent use. Paginated
/// sequences borrow the client and own their iteration state exclusively.
#[derive(Debug)]
pub struct GdaxClient {
    http_client: Client,
    base_url: Url,
    credentials: Credentials,
    signer: RequestSigner,
}

impl GdaxClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(ClientConfig::default(), credentials)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, credentials: Credentials) -> Result<Self> {
        Self::with_config_and_base_url(config, API_BASE_URL, credentials)
    }

    /// Create a client against an explicit base URL (tests point this at a
    /// mock server)
    pub fn with_config_and_base_url(
        config: ClientConfig,
        base_url: &str,
        credentials: Credentials,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        let signer = RequestSigner::new(&credentials.secret)?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            credentials,
            signer,
        })
    }

    /// Get the configured credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Build a signed request; `path_and_query` must start with '/'
    fn signed_request(
        &self,
        method: &Method,
        path_and_query: &str,
        body: &str,
    ) -> Result<reqwest::RequestBuilder> {
        let url = self.base_url.join(path_and_query)?;
        let timestamp = RequestSigner::timestamp();
        let signature = self
            .signer
            .sign(&timestamp, method.as_str(), path_and_query, body);

        debug!(%method, path = path_and_query, "sending signed request");

        Ok(self
            .http_client
            .request(method.clone(), url)
            .header("CB-ACCESS-KEY", &self.credentials.key)
            .header("CB-ACCESS-SIGN", signature)
            .header("CB-ACCESS-TIMESTAMP", timestamp)
            .header("CB-ACCESS-PASSPHRASE", &self.credentials.passphrase)
            .header("Content-Type", "application/json")
            .body(body.to_string()))
    }

    /// Execute a request for a paginated collection endpoint.
    ///
    /// On 2xx returns the raw JSON body together with the cursor taken from
    /// the `CB-BEFORE` / `CB-AFTER` response headers; on any other status
    /// returns an `Api` error carrying the body's `message` field.
    pub(crate) async fn collection_request(
        &self,
        method: Method,
        path: &str,
        query: &str,
        body: &str,
    ) -> Result<(String, Cursor)> {
        let path_and_query = if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        };
        let response = self
            .signed_request(&method, &path_and_query, body)?
            .send()
            .await?;

        let status = response.status();
        let cursor = Cursor::from_headers(response.headers());
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Self::api_error_from_body(status, &text));
        }
        Ok((text, cursor))
    }

    /// Execute a one-shot request and decode the JSON response body
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path_and_query: &str,
        body: &str,
    ) -> Result<T> {
        let response = self
            .signed_request(&method, path_and_query, body)?
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Self::api_error_from_body(status, &text));
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Error replies carry `{"message": "..."}`; fall back to the status
    /// reason when the field is absent
    fn api_error_from_body(status: reqwest::StatusCode, body: &str) -> GdaxError {
        warn!(status = status.as_u16(), "api error response");
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|message| message.as_str())
                    .map(str::to_string)
            });
        match message {
            Some(message) => GdaxError::api_error(status, message),
            None => GdaxError::api_error(
                status,
                status.canonical_reason().unwrap_or("request failed"),
            ),
        }
    }
}
