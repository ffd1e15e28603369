//! Announcement types

use serde::{Deserialize, Serialize};

/// Kind of reference found in a commit message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// Issue tracker ticket (`ABC-123`)
    Ticket,
    /// Code host issue or pull request (`#123`)
    Issue,
}

/// A single reference found in a commit message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceMatch {
    /// Kind of reference
    pub kind: ReferenceKind,
    /// Normalized key: uppercased ticket key, or bare issue number
    pub key: String,
}

/// All references found in one commit message, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct References {
    /// Uppercased ticket keys
    pub ticket_keys: Vec<String>,
    /// Issue numbers without the leading `#`
    pub issue_keys: Vec<String>,
}

impl References {
    /// Check if nothing was found
    pub fn is_empty(&self) -> bool {
        self.ticket_keys.is_empty() && self.issue_keys.is_empty()
    }

    /// All matches, tickets first
    pub fn matches(&self) -> Vec<ReferenceMatch> {
        let tickets = self.ticket_keys.iter().map(|key| ReferenceMatch {
            kind: ReferenceKind::Ticket,
            key: key.clone(),
        });
        let issues = self.issue_keys.iter().map(|key| ReferenceMatch {
            kind: ReferenceKind::Issue,
            key: key.clone(),
        });
        tickets.chain(issues).collect()
    }
}

/// Kind of announcement line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Linked to a ticket, optionally annotated with a PR
    Ticket,
    /// Linked to a PR only
    Issue,
    /// No reference at all
    Plain,
}

/// One announcement line derived from a single commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Line kind
    pub kind: ChangeKind,
    /// Ticket key, issue number, or short commit id for plain lines
    pub primary_key: String,
    /// Cleaned commit title
    pub summary: String,
    /// Link for the primary key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Issue number co-occurring with a ticket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_key: Option<String>,
    /// Link for the secondary key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_url: Option<String>,
    /// Short commit id
    pub commit_id: String,
    /// Commit author name
    pub commit_author: String,
}

impl Change {
    /// Create a ticket line
    pub fn ticket(
        key: impl Into<String>,
        summary: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            kind: ChangeKind::Ticket,
            primary_key: key.into(),
            summary: summary.into(),
            url: Some(url.into()),
            secondary_key: None,
            secondary_url: None,
            commit_id: String::new(),
            commit_author: String::new(),
        }
    }

    /// Create an issue line
    pub fn issue(
        number: impl Into<String>,
        summary: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            kind: ChangeKind::Issue,
            ..Self::ticket(number, summary, url)
        }
    }

    /// Create a plain line
    pub fn plain(commit_id: impl Into<String>, summary: impl Into<String>) -> Self {
        let commit_id = commit_id.into();
        Self {
            kind: ChangeKind::Plain,
            primary_key: commit_id.clone(),
            summary: summary.into(),
            url: None,
            secondary_key: None,
            secondary_url: None,
            commit_id,
            commit_author: String::new(),
        }
    }

    /// Attach a secondary issue reference
    pub fn with_secondary(mut self, key: impl Into<String>, url: impl Into<String>) -> Self {
        self.secondary_key = Some(key.into());
        self.secondary_url = Some(url.into());
        self
    }

    /// Set the originating commit
    pub fn with_commit(mut self, id: impl Into<String>, author: impl Into<String>) -> Self {
        self.commit_id = id.into();
        self.commit_author = author.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references_matches_order() {
        let refs = References {
            ticket_keys: vec!["ABC-1".to_string()],
            issue_keys: vec!["9".to_string()],
        };
        let matches = refs.matches();
        assert_eq!(matches[0].kind, ReferenceKind::Ticket);
        assert_eq!(matches[1].key, "9");
        assert!(!refs.is_empty());
        assert!(References::default().is_empty());
    }

    #[test]
    fn test_change_builders() {
        let change = Change::ticket("ABC-1", "Fix", "https://t/browse/ABC-1")
            .with_secondary("42", "https://g/pull/42")
            .with_commit("abc1234", "Ada");
        assert_eq!(change.kind, ChangeKind::Ticket);
        assert_eq!(change.secondary_key.as_deref(), Some("42"));
        assert_eq!(change.commit_author, "Ada");

        let change = Change::issue("42", "Fix", "https://g/pull/42");
        assert_eq!(change.kind, ChangeKind::Issue);
        assert_eq!(change.primary_key, "42");

        let change = Change::plain("abc1234", "Bump deps");
        assert!(change.url.is_none());
        assert_eq!(change.primary_key, "abc1234");
    }
}
