//! Block Kit interaction payloads.
//!
//! Slack posts these form-encoded, with the JSON in a single `payload`
//! field, whenever a user clicks a button or toggles a checkbox.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SlackError, SlackResult};
use crate::preview::{ANNOUNCEMENT_BLOCK_PREFIX, SELECT_BLOCK_PREFIX};

/// Form body of an interaction request.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionForm {
    /// JSON-encoded [`InteractionPayload`].
    pub payload: String,
}

/// A `block_actions` interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionPayload {
    /// Interaction type (e.g., "block_actions").
    #[serde(rename = "type")]
    pub kind: String,
    /// User who interacted.
    pub user: InteractionUser,
    /// URL for replacing or following up on the message.
    #[serde(default)]
    pub response_url: String,
    /// Actions that triggered this interaction.
    #[serde(default)]
    pub actions: Vec<BlockAction>,
    /// Current values of every input in the message.
    #[serde(default)]
    pub state: Option<InteractionState>,
    /// The message the interaction happened on.
    #[serde(default)]
    pub message: Option<InteractionMessage>,
}

/// User reference in an interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionUser {
    pub id: String,
    #[serde(default)]
    pub username: String,
}

/// One triggered action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockAction {
    pub action_id: String,
    #[serde(default)]
    pub block_id: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Input state, keyed by block id then action id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionState {
    #[serde(default)]
    pub values: HashMap<String, HashMap<String, ActionState>>,
}

/// State of a single input element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionState {
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

/// A selected checkbox option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedOption {
    pub value: String,
}

/// Message carried in the interaction; blocks are kept as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionMessage {
    #[serde(default)]
    pub blocks: Vec<serde_json::Value>,
}

impl InteractionPayload {
    /// Parse the JSON carried in the `payload` form field.
    pub fn parse(payload: &str) -> SlackResult<Self> {
        serde_json::from_str(payload)
            .map_err(|e| SlackError::InvalidPayload(format!("interaction payload: {}", e)))
    }

    /// The first action with the given id.
    pub fn action(&self, action_id: &str) -> Option<&BlockAction> {
        self.actions.iter().find(|a| a.action_id == action_id)
    }

    /// Indices of every checked change across all checkbox groups, ascending.
    pub fn checked_indices(&self) -> Vec<usize> {
        let Some(state) = &self.state else {
            return Vec::new();
        };

        let mut indices: Vec<usize> = state
            .values
            .iter()
            .filter(|(block_id, _)| block_id.starts_with(SELECT_BLOCK_PREFIX))
            .flat_map(|(_, actions)| actions.values())
            .flat_map(|action| action.selected_options.iter())
            .filter_map(|option| option.value.parse().ok())
            .collect();
        indices.sort_unstable();
        indices.dedup();

        debug!(checked = indices.len(), "collected checked indices");
        indices
    }

    /// Announcement text as shown in the message, reassembled from its
    /// section blocks.
    pub fn rendered_text(&self) -> Option<String> {
        let message = self.message.as_ref()?;
        let sections: Vec<&str> = message
            .blocks
            .iter()
            .filter(|block| {
                block
                    .get("block_id")
                    .and_then(|id| id.as_str())
                    .is_some_and(|id| id.starts_with(ANNOUNCEMENT_BLOCK_PREFIX))
            })
            .filter_map(|block| block.pointer("/text/text").and_then(|t| t.as_str()))
            .collect();

        if sections.is_empty() {
            None
        } else {
            Some(sections.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> InteractionPayload {
        InteractionPayload::parse(
            &serde_json::json!({
                "type": "block_actions",
                "user": { "id": "U1", "username": "ada" },
                "response_url": "https://hooks.example/actions/1",
                "actions": [
                    { "action_id": "herald_publish", "block_id": "controls", "value": "{}" }
                ],
                "state": {
                    "values": {
                        "select_0": {
                            "herald_select_0": {
                                "type": "checkboxes",
                                "selected_options": [
                                    { "value": "3", "text": { "type": "plain_text", "text": "4." } },
                                    { "value": "0", "text": { "type": "plain_text", "text": "1." } }
                                ]
                            }
                        },
                        "select_1": {
                            "herald_select_1": {
                                "type": "checkboxes",
                                "selected_options": [ { "value": "12" } ]
                            }
                        },
                        "other": {
                            "thing": { "selected_options": [ { "value": "7" } ] }
                        }
                    }
                },
                "message": {
                    "blocks": [
                        { "type": "header", "text": { "type": "plain_text", "text": "Preview" } },
                        { "type": "section", "block_id": "announcement_0",
                          "text": { "type": "mrkdwn", "text": "• one", "verbatim": false } },
                        { "type": "section", "block_id": "announcement_1",
                          "text": { "type": "mrkdwn", "text": "• two" } },
                        { "type": "rich_text", "block_id": "xyz", "elements": [] }
                    ]
                }
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_checked_indices_across_groups() {
        assert_eq!(payload().checked_indices(), vec![0, 3, 12]);
    }

    #[test]
    fn test_rendered_text_from_sections() {
        assert_eq!(payload().rendered_text().as_deref(), Some("• one\n• two"));
    }

    #[test]
    fn test_action_lookup() {
        let payload = payload();
        assert_eq!(payload.action("herald_publish").unwrap().value.as_deref(), Some("{}"));
        assert!(payload.action("herald_cancel").is_none());
    }

    #[test]
    fn test_minimal_payload() {
        let payload =
            InteractionPayload::parse(r#"{"type":"block_actions","user":{"id":"U2"}}"#).unwrap();
        assert!(payload.checked_indices().is_empty());
        assert!(payload.rendered_text().is_none());
    }

    #[test]
    fn test_invalid_payload() {
        let err = InteractionPayload::parse("{").unwrap_err();
        assert!(matches!(err, SlackError::InvalidPayload(_)));
    }
}
