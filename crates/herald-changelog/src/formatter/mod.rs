//! Announcement formatters

mod chunk;
mod mrkdwn;
mod recover;

pub use chunk::{chunk, truncate_line, ELLIPSIS};
pub use mrkdwn::{render, MrkdwnFormatter, BULLET};
pub use recover::{parse_announcement, parse_line};

use crate::types::Change;

/// Trait for announcement formatters
pub trait AnnouncementFormatter: Send + Sync {
    /// Render announcement lines for a release to a single message
    fn format(&self, changes: &[Change], release_id: &str) -> String;

    /// Render a single announcement line, without the surrounding header
    fn format_line(&self, change: &Change) -> String;
}
