/*
[INPUT]:  Error sources (HTTP, API, decoding, configuration, feed)
[OUTPUT]: Structured error types shared by the entire crate
[POS]:    Error handling layer - unified error types
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the GDAX adapter.
///
/// The enum is `Clone` on purpose: a paginated sequence keeps a sticky
/// `pending_error` and hands a copy to every subsequent `take_next` call,
/// so error sources are captured as text rather than as the source error
/// value itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GdaxError {
    /// HTTP transport failed (connection, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// API returned a non-2xx response. Displays as the server's own
    /// `message` text, nothing more.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("response decoding failed: {0}")]
    Decode(String),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    UrlParse(String),

    /// Websocket feed error
    #[error("feed error: {0}")]
    Feed(String),

    /// Credentials or client configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller broke the pagination protocol (e.g. `take_next` without a
    /// preceding successful `has_more`)
    #[error("pagination contract violated: {0}")]
    Contract(&'static str),
}

impl GdaxError {
    /// Create an API error from a status code and the server message
    pub fn api_error(status: reqwest::StatusCode, message: impl Into<String>) -> Self {
        GdaxError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// Check if the error came from the remote API rather than the client
    pub fn is_api_error(&self) -> bool {
        matches!(self, GdaxError::Api { .. })
    }
}

impl From<reqwest::Error> for GdaxError {
    fn from(err: reqwest::Error) -> Self {
        GdaxError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for GdaxError {
    fn from(err: serde_json::Error) -> Self {
        GdaxError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for GdaxError {
    fn from(err: url::ParseError) -> Self {
        GdaxError::UrlParse(err.to_string())
    }
}

/// Result type alias for GDAX operations
pub type Result<T> = std::result::Result<T, GdaxError>;
