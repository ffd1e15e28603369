//! Publishing announcements to a chat channel.

use async_trait::async_trait;
use herald_core::error::PublishError;
use herald_core::Destination;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{api_error, SlackError, SlackResult};

const DEFAULT_API_URL: &str = "https://slack.com/api";

/// Destination for finished announcements
#[async_trait]
pub trait PublishSink: Send + Sync {
    /// Sink name, for logs
    fn name(&self) -> &'static str;

    /// Post one message to the destination
    async fn publish(&self, destination: &Destination, text: &str) -> Result<(), PublishError>;
}

/// Publishes through the Slack Web API
#[derive(Debug, Clone)]
pub struct SlackPublisher {
    api_url: String,
    token: Option<String>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl SlackPublisher {
    /// Create a publisher talking to slack.com
    pub fn new(token: Option<String>) -> Self {
        Self::with_api_url(DEFAULT_API_URL, token)
    }

    /// Create a publisher talking to a custom API base
    pub fn with_api_url(api_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
        }
    }

    /// Call a Web API method with a JSON body
    async fn api_call(&self, method: &str, body: &serde_json::Value) -> SlackResult<()> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| SlackError::Config("no bot token configured".to_string()))?;
        let url = format!("{}/{}", self.api_url, method);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("Content-Type", "application/json; charset=utf-8")
            .json(body)
            .send()
            .await?;

        if response.status() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(30);
            return Err(SlackError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::Api(format!("{}: {}", status, body)));
        }

        let result: ApiResponse = response.json().await?;
        if !result.ok {
            let code = result.error.unwrap_or_else(|| "unknown".to_string());
            warn!(method, code, "Slack API call rejected");
            return Err(api_error(&code));
        }

        debug!(method, "Slack API call succeeded");
        Ok(())
    }
}

#[async_trait]
impl PublishSink for SlackPublisher {
    fn name(&self) -> &'static str {
        "slack"
    }

    #[instrument(skip(self, text), fields(channel = %destination.channel_id, text_len = text.len()))]
    async fn publish(&self, destination: &Destination, text: &str) -> Result<(), PublishError> {
        if self.token.is_none() {
            return Err(PublishError::MissingToken);
        }

        let body = serde_json::json!({
            "channel": destination.channel_id,
            "text": text,
            "unfurl_links": false,
        });
        self.api_call("chat.postMessage", &body).await?;

        info!(channel = %destination, "announcement chunk published");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_publish_posts_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .and(header("Authorization", "Bearer xoxb-test"))
            .and(body_partial_json(serde_json::json!({
                "channel": "C123",
                "text": "• hello"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "ts": "1700000000.000100"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let publisher = SlackPublisher::with_api_url(server.uri(), Some("xoxb-test".into()));
        publisher
            .publish(&Destination::new("C123", "releases"), "• hello")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_publish_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": false,
                "error": "not_in_channel"
            })))
            .mount(&server)
            .await;

        let publisher = SlackPublisher::with_api_url(server.uri(), Some("xoxb-test".into()));
        let err = publisher
            .publish(&Destination::new("C123", ""), "text")
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::Api(ref m) if m.contains("not_in_channel")));
    }

    #[tokio::test]
    async fn test_publish_without_token() {
        let publisher = SlackPublisher::new(None);
        let err = publisher
            .publish(&Destination::new("C123", ""), "text")
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::MissingToken));
    }
}
