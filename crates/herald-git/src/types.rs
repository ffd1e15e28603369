//! Git types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information about a git commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_id: String,
    /// First line of the message
    pub title: String,
    /// Full commit message, title included
    pub full_message: String,
    /// Author name
    pub author_name: String,
    /// Author timestamp
    pub author_date: DateTime<Utc>,
}

impl CommitInfo {
    /// Create a new CommitInfo from a full commit message
    pub fn new(
        hash: impl Into<String>,
        full_message: impl Into<String>,
        author_name: impl Into<String>,
        author_date: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        let short_id = hash.chars().take(7).collect();
        let full_message = full_message.into();
        let title = full_message.lines().next().unwrap_or_default().trim().to_string();

        Self {
            hash,
            short_id,
            title,
            full_message,
            author_name: author_name.into(),
            author_date,
        }
    }

    /// Text scanned for references: the title followed by the full message
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.full_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_info() {
        let commit = CommitInfo::new(
            "abc1234567890",
            "Fix login (#42)\n\nABC-100 fixes login",
            "Author",
            Utc::now(),
        );
        assert_eq!(commit.short_id, "abc1234");
        assert_eq!(commit.title, "Fix login (#42)");
        assert!(commit.full_message.contains("ABC-100"));
    }

    #[test]
    fn test_empty_message() {
        let commit = CommitInfo::new("abc", "", "Author", Utc::now());
        assert_eq!(commit.short_id, "abc");
        assert_eq!(commit.title, "");
    }

    #[test]
    fn test_searchable_text() {
        let commit = CommitInfo::new("abc1234", "Title\n\nBody", "A", Utc::now());
        assert_eq!(commit.searchable_text(), "Title Title\n\nBody");
    }
}
