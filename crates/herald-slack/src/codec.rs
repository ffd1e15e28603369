//! Selection token carried by the Publish button.
//!
//! The preview message has to remember which announcement it is for
//! without server-side storage, so the pending announcement travels inside
//! the button value and comes back with the interaction payload. Button
//! values are size-limited: when the full change list does not fit, only a
//! summary is carried and the changes are recovered from the preview text.

use std::collections::BTreeSet;

use herald_changelog::{parse_announcement, AnnouncementFormatter, Change, MrkdwnFormatter};
use herald_core::{Destination, PendingAnnouncement};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::SlackResult;

/// Characters of rendered change lines kept in a simplified token
pub const DIGEST_LENGTH: usize = 100;

/// Decoded selection state
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionToken {
    /// Carries every candidate change
    Full {
        release_id: String,
        destination: Destination,
        changes: Vec<Change>,
    },
    /// Carries only a summary; changes must be recovered from rendered text
    Simplified {
        release_id: String,
        destination: Destination,
        change_count: usize,
        changes_digest: String,
    },
}

impl SelectionToken {
    /// Release the token is for
    pub fn release_id(&self) -> &str {
        match self {
            Self::Full { release_id, .. } | Self::Simplified { release_id, .. } => release_id,
        }
    }

    /// Where the announcement will be published
    pub fn destination(&self) -> &Destination {
        match self {
            Self::Full { destination, .. } | Self::Simplified { destination, .. } => destination,
        }
    }

    /// Number of candidate changes when the token was issued
    pub fn change_count(&self) -> usize {
        match self {
            Self::Full { changes, .. } => changes.len(),
            Self::Simplified { change_count, .. } => *change_count,
        }
    }

    /// Check if this is a simplified token
    pub fn is_simplified(&self) -> bool {
        matches!(self, Self::Simplified { .. })
    }
}

/// JSON shape of the token. Variant is told apart by its fields.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireToken {
    Simplified {
        release_id: String,
        destination: Destination,
        change_count: usize,
        simplified: bool,
        changes_digest: String,
    },
    Full {
        release_id: String,
        destination: Destination,
        changes: Vec<Change>,
    },
}

impl From<WireToken> for SelectionToken {
    fn from(wire: WireToken) -> Self {
        match wire {
            WireToken::Simplified {
                release_id,
                destination,
                change_count,
                changes_digest,
                ..
            } => Self::Simplified {
                release_id,
                destination,
                change_count,
                changes_digest,
            },
            WireToken::Full {
                release_id,
                destination,
                changes,
            } => Self::Full {
                release_id,
                destination,
                changes,
            },
        }
    }
}

/// Encode a pending announcement, falling back to a simplified token when
/// the full encoding exceeds `max_token_bytes`.
///
/// The simplified token is bounded by the digest and the destination, not by
/// `max_token_bytes`. It is returned even when it is over the limit, with a
/// warning.
#[instrument(skip(pending), fields(release_id = %pending.release_id, change_count = pending.changes.len()))]
pub fn encode_selection_token(
    pending: &PendingAnnouncement<Change>,
    max_token_bytes: usize,
) -> SlackResult<String> {
    let full = serde_json::to_string(&WireToken::Full {
        release_id: pending.release_id.clone(),
        destination: pending.destination.clone(),
        changes: pending.changes.clone(),
    })?;

    if full.len() <= max_token_bytes {
        debug!(token_bytes = full.len(), "full selection token");
        return Ok(full);
    }

    info!(
        token_bytes = full.len(),
        max_token_bytes, "selection token too large, simplifying"
    );
    let simplified = serde_json::to_string(&WireToken::Simplified {
        release_id: pending.release_id.clone(),
        destination: pending.destination.clone(),
        change_count: pending.changes.len(),
        simplified: true,
        changes_digest: digest(&pending.changes),
    })?;
    if simplified.len() > max_token_bytes {
        warn!(
            token_bytes = simplified.len(),
            max_token_bytes, "simplified selection token still exceeds the limit"
        );
    }
    Ok(simplified)
}

/// Decode a token produced by [`encode_selection_token`]
pub fn decode_selection_token(token: &str) -> SlackResult<SelectionToken> {
    let wire: WireToken = serde_json::from_str(token)?;
    Ok(wire.into())
}

/// Resolve the human selection into the changes to publish.
///
/// Out-of-range indices are ignored. An empty selection keeps every change
/// that can be recovered. A simplified token without rendered text yields
/// nothing.
#[instrument(skip(token, rendered_text), fields(simplified = token.is_simplified()))]
pub fn reconcile_selection(
    token: &SelectionToken,
    checked_indices: &[usize],
    rendered_text: Option<&str>,
) -> Vec<Change> {
    let available = match token {
        SelectionToken::Full { changes, .. } => changes.clone(),
        SelectionToken::Simplified { change_count, .. } => {
            let recovered = rendered_text.map(parse_announcement).unwrap_or_default();
            if recovered.len() != *change_count {
                warn!(
                    expected = change_count,
                    recovered = recovered.len(),
                    "recovered change count differs from token"
                );
            }
            recovered
        }
    };

    if checked_indices.is_empty() {
        debug!(count = available.len(), "empty selection, keeping everything");
        return available;
    }

    let checked: BTreeSet<usize> = checked_indices.iter().copied().collect();
    let selected: Vec<Change> = checked
        .into_iter()
        .filter_map(|index| available.get(index).cloned())
        .collect();

    debug!(
        available = available.len(),
        selected = selected.len(),
        "selection reconciled"
    );
    selected
}

fn digest(changes: &[Change]) -> String {
    let formatter = MrkdwnFormatter::new();
    let lines: Vec<String> = changes.iter().map(|c| formatter.format_line(c)).collect();
    lines.join("\n").chars().take(DIGEST_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_changelog::render;

    fn changes(count: usize) -> Vec<Change> {
        (0..count)
            .map(|i| {
                Change::ticket(
                    format!("ABC-{}", i),
                    format!("Change number {}", i),
                    format!("https://t.example/browse/ABC-{}", i),
                )
                .with_commit(format!("abc{:04}", i), "Ada")
            })
            .collect()
    }

    fn pending(count: usize) -> PendingAnnouncement<Change> {
        PendingAnnouncement::new("42", Destination::new("C123", "releases"), changes(count))
    }

    #[test]
    fn test_small_announcement_gets_full_token() {
        let pending = pending(3);
        let token = encode_selection_token(&pending, 1900).unwrap();
        assert!(token.len() <= 1900);
        assert!(!token.contains('\n'));

        let decoded = decode_selection_token(&token).unwrap();
        assert_eq!(
            decoded,
            SelectionToken::Full {
                release_id: "42".into(),
                destination: Destination::new("C123", "releases"),
                changes: pending.changes.clone(),
            }
        );
    }

    #[test]
    fn test_large_announcement_gets_simplified_token() {
        let pending = pending(40);
        let token = encode_selection_token(&pending, 1900).unwrap();
        assert!(token.contains("\"simplified\":true"));

        let decoded = decode_selection_token(&token).unwrap();
        assert!(decoded.is_simplified());
        assert_eq!(decoded.change_count(), 40);
        assert_eq!(decoded.release_id(), "42");
        assert_eq!(decoded.destination().channel_id, "C123");
        match decoded {
            SelectionToken::Simplified { changes_digest, .. } => {
                assert_eq!(changes_digest.chars().count(), DIGEST_LENGTH);
                assert!(changes_digest.starts_with("• <https://t.example/browse/ABC-0|"));
            }
            SelectionToken::Full { .. } => panic!("expected simplified token"),
        }
    }

    #[test]
    fn test_tiny_limit_still_yields_decodable_simplified_token() {
        let pending = pending(2);
        let token = encode_selection_token(&pending, 16).unwrap();
        assert!(token.len() > 16);

        let decoded = decode_selection_token(&token).unwrap();
        assert!(decoded.is_simplified());
        assert_eq!(decoded.change_count(), 2);
    }

    #[test]
    fn test_destination_wire_names() {
        let token = encode_selection_token(&pending(1), 1900).unwrap();
        assert!(token.contains("\"destination\":{\"id\":\"C123\",\"name\":\"releases\"}"));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_selection_token("not json").is_err());
        assert!(decode_selection_token("{\"release_id\":\"1\"}").is_err());
    }

    #[test]
    fn test_empty_selection_keeps_everything() {
        let token = decode_selection_token(&encode_selection_token(&pending(5), 1900).unwrap()).unwrap();
        assert_eq!(reconcile_selection(&token, &[], None).len(), 5);
    }

    #[test]
    fn test_selection_picks_checked_in_order() {
        let token = decode_selection_token(&encode_selection_token(&pending(5), 1900).unwrap()).unwrap();
        let selected = reconcile_selection(&token, &[3, 1, 3, 99], None);
        let keys: Vec<&str> = selected.iter().map(|c| c.primary_key.as_str()).collect();
        assert_eq!(keys, vec!["ABC-1", "ABC-3"]);
    }

    #[test]
    fn test_simplified_recovers_from_rendered_text() {
        let pending = pending(40);
        let token =
            decode_selection_token(&encode_selection_token(&pending, 1900).unwrap()).unwrap();
        let rendered = render(&pending.changes, "42", None);

        let all = reconcile_selection(&token, &[], Some(&rendered));
        assert_eq!(all.len(), 40);
        assert_eq!(all[7].primary_key, "ABC-7");
        assert!(all[7].commit_id.is_empty());

        let some = reconcile_selection(&token, &[0, 39], Some(&rendered));
        assert_eq!(some.len(), 2);
        assert_eq!(some[1].summary, "Change number 39");
    }

    #[test]
    fn test_simplified_without_text_is_empty() {
        let token = SelectionToken::Simplified {
            release_id: "42".into(),
            destination: Destination::new("C123", ""),
            change_count: 3,
            changes_digest: String::new(),
        };
        assert!(reconcile_selection(&token, &[], None).is_empty());
        assert!(reconcile_selection(&token, &[0, 1], None).is_empty());
    }
}
