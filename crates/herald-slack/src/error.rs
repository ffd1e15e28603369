//! Error types for Slack integration.

use herald_core::error::PublishError;
use thiserror::Error;

/// Errors that can occur during Slack operations.
#[derive(Error, Debug)]
pub enum SlackError {
    /// Configuration error (missing or invalid config).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication error (invalid token, revoked, etc.).
    #[error("Authentication error: {0}")]
    Auth(String),

    /// API request failed.
    #[error("Slack API error: {0}")]
    Api(String),

    /// API rate limited.
    #[error("Rate limited: retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Network/HTTP error.
    #[error("Network error: {0}")]
    Network(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid payload received from Slack.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<reqwest::Error> for SlackError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            SlackError::Network(format!("Connection failed: {}", err))
        } else {
            SlackError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SlackError {
    fn from(err: serde_json::Error) -> Self {
        SlackError::Json(err.to_string())
    }
}

impl From<SlackError> for PublishError {
    fn from(err: SlackError) -> Self {
        match err {
            SlackError::Network(msg) => PublishError::Request(msg),
            other => PublishError::Api(other.to_string()),
        }
    }
}

/// Result type for Slack operations.
pub type SlackResult<T> = std::result::Result<T, SlackError>;

/// Map a Slack `error` code from an `"ok": false` response.
pub(crate) fn api_error(code: &str) -> SlackError {
    match code {
        "invalid_auth" | "not_authed" | "account_inactive" | "token_revoked" => {
            SlackError::Auth(code.to_string())
        }
        "ratelimited" | "rate_limited" => SlackError::RateLimited {
            retry_after_secs: 30,
        },
        _ => SlackError::Api(code.to_string()),
    }
}
