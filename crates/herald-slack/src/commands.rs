//! Slack slash command handling.
//!
//! Supports `/announce <release> [#channel]`. The preview is returned as the
//! immediate (ephemeral) response; follow-ups go through `response_url`.

use std::sync::LazyLock;

use herald_core::Destination;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{SlackError, SlackResult};

/// `<#C123|name>` or `<#C123>` as Slack escapes channel mentions
static CHANNEL_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<#(?P<id>[A-Z0-9]+)(?:\|(?P<name>[^>]*))?>$").expect("Invalid regex")
});

/// Slack slash command payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlashCommandPayload {
    /// Team ID.
    #[serde(default)]
    pub team_id: String,
    /// Channel ID where command was invoked.
    pub channel_id: String,
    /// Channel name.
    #[serde(default)]
    pub channel_name: String,
    /// User ID who invoked the command.
    pub user_id: String,
    /// Username.
    #[serde(default)]
    pub user_name: String,
    /// The command (e.g., "/announce").
    pub command: String,
    /// Text after the command.
    #[serde(default)]
    pub text: String,
    /// URL for delayed responses.
    #[serde(default)]
    pub response_url: String,
}

/// Response type for slash command responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Only visible to the user who invoked the command.
    #[default]
    Ephemeral,
    /// Visible to everyone in the channel.
    InChannel,
}

/// Immediate response to a slash command.
///
/// Must be sent within 3 seconds of receiving the command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlashCommandResponse {
    /// Response type (ephemeral or in_channel).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    /// Simple text response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Block Kit blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<serde_json::Value>,
}

impl SlashCommandResponse {
    /// Create a simple ephemeral text response.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            response_type: Some(ResponseType::Ephemeral),
            text: Some(text.into()),
            blocks: None,
        }
    }

    /// Set Block Kit blocks.
    pub fn with_blocks(mut self, blocks: serde_json::Value) -> Self {
        self.blocks = Some(blocks);
        self
    }
}

/// Delayed response sent via response_url.
///
/// Can be sent up to 30 minutes after the original command or interaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DelayedResponse {
    /// Response type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    /// Whether to replace the original message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_original: Option<bool>,
    /// Whether to delete the original message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_original: Option<bool>,
    /// Text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Block Kit blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<serde_json::Value>,
}

impl DelayedResponse {
    /// Create a new delayed response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Replace the original message.
    pub fn replace_original(mut self) -> Self {
        self.replace_original = Some(true);
        self
    }
}

/// Send a delayed response to the response_url.
pub async fn send_delayed_response(
    client: &reqwest::Client,
    response_url: &str,
    response: &DelayedResponse,
) -> SlackResult<()> {
    debug!("Sending delayed response to: {}", response_url);

    let resp = client.post(response_url).json(response).send().await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        error!("Failed to send delayed response: {} - {}", status, body);
        return Err(SlackError::Api(format!(
            "Failed to send delayed response: {} - {}",
            status, body
        )));
    }

    debug!("Delayed response sent successfully");
    Ok(())
}

/// Parsed `/announce` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnounceRequest {
    /// Release to announce
    pub release_id: String,
    /// Explicit target channel, if one was mentioned
    pub channel: Option<Destination>,
}

/// Parse `/announce` text: a release id optionally followed by a channel
/// mention. Returns `None` when the release id is missing or the second
/// argument is not a channel mention.
pub fn parse_announce_text(text: &str) -> Option<AnnounceRequest> {
    let mut args = text.split_whitespace();
    let release_id = args.next()?.to_string();

    let channel = match args.next() {
        None => None,
        Some(arg) => {
            let caps = CHANNEL_MENTION.captures(arg)?;
            Some(Destination::new(
                &caps["id"],
                caps.name("name").map(|m| m.as_str()).unwrap_or_default(),
            ))
        }
    };

    if args.next().is_some() {
        return None;
    }

    Some(AnnounceRequest {
        release_id,
        channel,
    })
}

/// Usage hint shown for malformed commands
pub fn usage(command: &str) -> String {
    format!(
        "Usage: `{} <release> [#channel]`, e.g. `{} 42` or `{} 3.1 #releases`",
        command, command, command
    )
}
