//! Interactive preview message.
//!
//! The preview shows the rendered announcement, one checkbox per change
//! (all checked), and Publish / Cancel buttons. The Publish button carries
//! the selection token.

use herald_changelog::formatter::truncate_line;
use herald_changelog::{chunk, Change, ChangeKind};
use herald_core::config::AnnouncementConfig;
use herald_core::{Destination, PendingAnnouncement};
use tracing::{debug, instrument};

use crate::codec::encode_selection_token;
use crate::commands::DelayedResponse;
use crate::error::SlackResult;
use crate::messages::{
    SlackBlockElement, SlackMessageBuilder, SlackMessageContent, SlackOption, SlackTextObject,
};

/// Block id prefix of the sections holding announcement text
pub const ANNOUNCEMENT_BLOCK_PREFIX: &str = "announcement_";
/// Block id prefix of the checkbox groups
pub const SELECT_BLOCK_PREFIX: &str = "select_";
/// Action id of the Publish button
pub const PUBLISH_ACTION: &str = "herald_publish";
/// Action id of the Cancel button
pub const CANCEL_ACTION: &str = "herald_cancel";

/// Slack accepts at most 10 options per checkbox element
const OPTIONS_PER_GROUP: usize = 10;
/// Slack truncates option text beyond 75 characters
const OPTION_TEXT_LIMIT: usize = 75;

/// Size limits applied when building a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Maximum characters per announcement section
    pub max_chunk_length: usize,
    /// Maximum bytes of the selection token before it is simplified
    pub max_token_bytes: usize,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_chunk_length: 3000,
            max_token_bytes: 1900,
        }
    }
}

impl From<&AnnouncementConfig> for PreviewOptions {
    fn from(config: &AnnouncementConfig) -> Self {
        Self {
            max_chunk_length: config.max_chunk_length,
            max_token_bytes: config.max_token_bytes,
        }
    }
}

/// Build the preview message for a pending announcement
#[instrument(skip_all, fields(release_id = %pending.release_id, change_count = pending.changes.len()))]
pub fn build_preview(
    pending: &PendingAnnouncement<Change>,
    rendered: &str,
    options: &PreviewOptions,
) -> SlackResult<SlackMessageContent> {
    let token = encode_selection_token(pending, options.max_token_bytes)?;

    let mut builder = SlackMessageBuilder::new()
        .fallback(format!("Announcement preview for release {}", pending.release_id))
        .header(format!("Announcement preview: release {}", pending.release_id))
        .context(format!(
            "{} change(s) for {}. Uncheck anything that should be left out.",
            pending.total_change_count,
            pending.destination.mention()
        ));

    let chunks = chunk(rendered, options.max_chunk_length);
    for (i, piece) in chunks.iter().enumerate() {
        builder = builder.section_with_id(format!("{}{}", ANNOUNCEMENT_BLOCK_PREFIX, i), piece);
    }

    if !pending.changes.is_empty() {
        builder = builder.divider();
    }

    let groups = pending.changes.chunks(OPTIONS_PER_GROUP);
    let group_count = groups.len();
    for (group, changes) in groups.enumerate() {
        let options: Vec<SlackOption> = changes
            .iter()
            .enumerate()
            .map(|(offset, change)| change_option(group * OPTIONS_PER_GROUP + offset, change))
            .collect();

        builder = builder.actions(
            Some(format!("{}{}", SELECT_BLOCK_PREFIX, group)),
            vec![SlackBlockElement::Checkboxes {
                action_id: format!("herald_select_{}", group),
                initial_options: Some(options.clone()),
                options,
            }],
        );
    }

    builder = builder.actions(
        Some("controls".to_string()),
        vec![
            SlackBlockElement::Button {
                text: SlackTextObject::plain("Publish"),
                action_id: PUBLISH_ACTION.to_string(),
                value: Some(token),
                style: Some("primary".to_string()),
            },
            SlackBlockElement::Button {
                text: SlackTextObject::plain("Cancel"),
                action_id: CANCEL_ACTION.to_string(),
                value: None,
                style: None,
            },
        ],
    );

    debug!(
        sections = chunks.len(),
        checkbox_groups = group_count,
        "preview built"
    );
    Ok(builder.build())
}

/// Replacement for the preview once the announcement went out
pub fn published_message(destination: &Destination, change_count: usize) -> DelayedResponse {
    DelayedResponse::new()
        .with_text(format!(
            ":white_check_mark: Published {} change(s) to {}.",
            change_count,
            destination.mention()
        ))
        .replace_original()
}

/// Replacement for the preview when the user cancels
pub fn cancelled_message() -> DelayedResponse {
    DelayedResponse::new()
        .with_text("Announcement cancelled.")
        .replace_original()
}

fn change_option(index: usize, change: &Change) -> SlackOption {
    let label = match change.kind {
        ChangeKind::Ticket => format!("{} {}", change.primary_key, change.summary),
        ChangeKind::Issue => format!("#{} {}", change.primary_key, change.summary),
        ChangeKind::Plain => change.summary.clone(),
    };
    let mut text = format!("{}. {}", index + 1, label);
    if text.chars().count() > OPTION_TEXT_LIMIT {
        text = truncate_line(&text, OPTION_TEXT_LIMIT);
    }

    SlackOption {
        text: SlackTextObject::plain(text),
        value: index.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_selection_token, SelectionToken};
    use crate::messages::SlackBlock;
    use herald_changelog::render;

    fn pending(count: usize) -> PendingAnnouncement<Change> {
        let changes = (0..count)
            .map(|i| Change::issue(i.to_string(), format!("Change {}", i), format!("https://g.example/pull/{}", i)))
            .collect();
        PendingAnnouncement::new("7", Destination::new("C1", "releases"), changes)
    }

    fn checkbox_groups(message: &SlackMessageContent) -> Vec<Vec<SlackOption>> {
        message
            .blocks
            .iter()
            .flatten()
            .filter_map(|block| match block {
                SlackBlock::Actions { elements, .. } => match elements.first() {
                    Some(SlackBlockElement::Checkboxes { options, .. }) => Some(options.clone()),
                    _ => None,
                },
                _ => None,
            })
            .collect()
    }

    fn publish_value(message: &SlackMessageContent) -> Option<String> {
        message.blocks.iter().flatten().find_map(|block| match block {
            SlackBlock::Actions { elements, .. } => elements.iter().find_map(|e| match e {
                SlackBlockElement::Button { action_id, value, .. } if action_id == PUBLISH_ACTION => {
                    value.clone()
                }
                _ => None,
            }),
            _ => None,
        })
    }

    #[test]
    fn test_checkboxes_grouped_in_tens() {
        let pending = pending(23);
        let rendered = render(&pending.changes, "7", None);
        let message = build_preview(&pending, &rendered, &PreviewOptions::default()).unwrap();

        let groups = checkbox_groups(&message);
        assert_eq!(groups.iter().map(Vec::len).collect::<Vec<_>>(), vec![10, 10, 3]);
        assert_eq!(groups[2][0].value, "20");
        assert_eq!(groups[2][0].text.text, "21. #20 Change 20");
    }

    #[test]
    fn test_publish_button_carries_token() {
        let pending = pending(2);
        let rendered = render(&pending.changes, "7", None);
        let message = build_preview(&pending, &rendered, &PreviewOptions::default()).unwrap();

        let token = decode_selection_token(&publish_value(&message).unwrap()).unwrap();
        assert!(matches!(token, SelectionToken::Full { ref changes, .. } if changes.len() == 2));
    }

    #[test]
    fn test_long_text_split_into_sections() {
        let pending = pending(30);
        let rendered = render(&pending.changes, "7", None);
        let options = PreviewOptions {
            max_chunk_length: 200,
            max_token_bytes: 1900,
        };
        let message = build_preview(&pending, &rendered, &options).unwrap();

        let sections: Vec<&str> = message
            .blocks
            .iter()
            .flatten()
            .filter_map(|block| match block {
                SlackBlock::Section { text, block_id: Some(id) } if id.starts_with(ANNOUNCEMENT_BLOCK_PREFIX) => {
                    Some(text.text.as_str())
                }
                _ => None,
            })
            .collect();
        assert!(sections.len() > 1);
        assert!(sections.iter().all(|s| s.chars().count() <= 200));
        assert_eq!(sections.join("\n"), rendered);
    }

    #[test]
    fn test_option_text_truncated() {
        let change = Change::plain("abc1234", "x".repeat(200));
        let option = change_option(0, &change);
        assert_eq!(option.text.text.chars().count(), OPTION_TEXT_LIMIT);
        assert!(option.text.text.ends_with("..."));
    }

    #[test]
    fn test_confirmation_messages() {
        let done = published_message(&Destination::new("C1", "releases"), 4);
        assert!(done.text.as_deref().unwrap().contains("<#C1|releases>"));
        assert_eq!(done.replace_original, Some(true));
        assert_eq!(cancelled_message().replace_original, Some(true));
    }
}
