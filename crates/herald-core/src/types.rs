//! Core types for Herald

use serde::{Deserialize, Serialize};

/// Channel an announcement will be published to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Platform channel id
    #[serde(rename = "id")]
    pub channel_id: String,
    /// Human-readable channel name
    #[serde(rename = "name")]
    pub channel_name: String,
}

impl Destination {
    /// Create a new destination
    pub fn new(channel_id: impl Into<String>, channel_name: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            channel_name: channel_name.into(),
        }
    }

    /// Mention syntax understood by the chat platform
    pub fn mention(&self) -> String {
        if self.channel_name.is_empty() {
            format!("<#{}>", self.channel_id)
        } else {
            format!("<#{}|{}>", self.channel_id, self.channel_name)
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.channel_name.is_empty() {
            write!(f, "{}", self.channel_id)
        } else {
            write!(f, "#{}", self.channel_name)
        }
    }
}

/// An announcement awaiting human selection before publishing.
///
/// Generic over the change type so the core crate stays independent of the
/// changelog crate that defines it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingAnnouncement<C> {
    /// Release the announcement is for
    pub release_id: String,
    /// Where it will be published
    pub destination: Destination,
    /// Candidate changes, in announcement order
    pub changes: Vec<C>,
    /// Number of candidate changes
    pub total_change_count: usize,
}

impl<C> PendingAnnouncement<C> {
    /// Create a pending announcement from its candidate changes
    pub fn new(release_id: impl Into<String>, destination: Destination, changes: Vec<C>) -> Self {
        let total_change_count = changes.len();
        Self {
            release_id: release_id.into(),
            destination,
            changes,
            total_change_count,
        }
    }

    /// Check if there is anything to announce
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
