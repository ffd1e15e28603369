//! Slack Block Kit message types.
//!
//! Only the blocks and elements Herald sends are modelled. Blocks coming
//! back inside interaction payloads are read as raw JSON instead, since
//! Slack may add block types these enums do not know about.

use serde::{Deserialize, Serialize};

/// Slack Block Kit block types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackBlock {
    /// Header block.
    Header { text: SlackTextObject },
    /// Section block (main content).
    Section {
        text: SlackTextObject,
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
    },
    /// Divider block.
    Divider {},
    /// Context block (small text).
    Context { elements: Vec<SlackTextObject> },
    /// Actions block (buttons, checkboxes).
    Actions {
        elements: Vec<SlackBlockElement>,
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
    },
}

/// Slack text object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackTextObject {
    #[serde(rename = "type")]
    pub text_type: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
}

impl SlackTextObject {
    /// Create a plain text object.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text_type: "plain_text".to_string(),
            text: text.into(),
            emoji: Some(true),
        }
    }

    /// Create a mrkdwn text object.
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            text_type: "mrkdwn".to_string(),
            text: text.into(),
            emoji: None,
        }
    }
}

/// One option of a checkbox group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackOption {
    pub text: SlackTextObject,
    pub value: String,
}

/// Interactive block elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackBlockElement {
    /// Button element.
    Button {
        text: SlackTextObject,
        action_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<String>,
    },
    /// Checkbox group element.
    Checkboxes {
        action_id: String,
        options: Vec<SlackOption>,
        #[serde(skip_serializing_if = "Option::is_none")]
        initial_options: Option<Vec<SlackOption>>,
    },
}

/// Slack message content with blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlackMessageContent {
    /// Fallback text for notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Block Kit blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<SlackBlock>>,
}

impl SlackMessageContent {
    /// Create a new message content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set fallback text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set blocks.
    pub fn with_blocks(mut self, blocks: Vec<SlackBlock>) -> Self {
        self.blocks = Some(blocks);
        self
    }

    /// Blocks as a JSON value, for slash command and delayed responses.
    pub fn blocks_json(&self) -> Option<serde_json::Value> {
        self.blocks
            .as_ref()
            .and_then(|blocks| serde_json::to_value(blocks).ok())
    }
}

/// Builder for creating rich Slack messages.
pub struct SlackMessageBuilder {
    blocks: Vec<SlackBlock>,
    fallback_text: Option<String>,
}

impl SlackMessageBuilder {
    /// Create a new message builder.
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            fallback_text: None,
        }
    }

    /// Set fallback text for notifications.
    pub fn fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback_text = Some(text.into());
        self
    }

    /// Add a header block.
    pub fn header(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(SlackBlock::Header {
            text: SlackTextObject::plain(text),
        });
        self
    }

    /// Add a section with mrkdwn text.
    pub fn section(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(SlackBlock::Section {
            text: SlackTextObject::mrkdwn(text),
            block_id: None,
        });
        self
    }

    /// Add a section with mrkdwn text and an explicit block id.
    pub fn section_with_id(mut self, block_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.blocks.push(SlackBlock::Section {
            text: SlackTextObject::mrkdwn(text),
            block_id: Some(block_id.into()),
        });
        self
    }

    /// Add a divider.
    pub fn divider(mut self) -> Self {
        self.blocks.push(SlackBlock::Divider {});
        self
    }

    /// Add a context block.
    pub fn context(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(SlackBlock::Context {
            elements: vec![SlackTextObject::mrkdwn(text)],
        });
        self
    }

    /// Add an actions block.
    pub fn actions(mut self, block_id: Option<String>, elements: Vec<SlackBlockElement>) -> Self {
        self.blocks.push(SlackBlock::Actions { elements, block_id });
        self
    }

    /// Build the message content.
    pub fn build(self) -> SlackMessageContent {
        SlackMessageContent {
            text: self.fallback_text,
            blocks: Some(self.blocks),
        }
    }
}

impl Default for SlackMessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
