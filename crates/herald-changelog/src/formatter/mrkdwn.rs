//! Slack mrkdwn announcement formatter

use tracing::{debug, instrument};

use super::AnnouncementFormatter;
use crate::types::{Change, ChangeKind};

/// Marker starting every announcement line
pub const BULLET: &str = "•";

const DEFAULT_BRANCH_FORMAT: &str = "release/{release}";
const RELEASE_PLACEHOLDER: &str = "{{releaseNumber}}";
const COUNT_PLACEHOLDER: &str = "{{changeCount}}";

/// Formatter producing bulleted mrkdwn with `<url|text>` links
#[derive(Debug, Clone)]
pub struct MrkdwnFormatter {
    /// Branch name format used in the header
    pub branch_format: String,
    /// Custom template replacing the whole message
    pub template: Option<String>,
}

impl MrkdwnFormatter {
    /// Create a new mrkdwn formatter
    pub fn new() -> Self {
        Self {
            branch_format: DEFAULT_BRANCH_FORMAT.to_string(),
            template: None,
        }
    }

    /// Set the branch name format (must contain `{release}`)
    pub fn with_branch_format(mut self, format: impl Into<String>) -> Self {
        self.branch_format = format.into();
        self
    }

    /// Use a custom template instead of the bulleted list
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    fn branch(&self, release_id: &str) -> String {
        self.branch_format.replace("{release}", release_id)
    }
}

impl Default for MrkdwnFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnouncementFormatter for MrkdwnFormatter {
    #[instrument(skip(self, changes), fields(change_count = changes.len()))]
    fn format(&self, changes: &[Change], release_id: &str) -> String {
        if let Some(template) = &self.template {
            return template
                .replace(RELEASE_PLACEHOLDER, release_id)
                .replace(COUNT_PLACEHOLDER, &changes.len().to_string());
        }

        let branch = self.branch(release_id);
        if changes.is_empty() {
            return format!("No changes with ticket or PR references were found for `{}`.", branch);
        }

        let lines: Vec<String> = changes.iter().map(|c| self.format_line(c)).collect();
        let output = format!(
            ":rocket: *Release notes for `{}`*\n\n{}",
            branch,
            lines.join("\n")
        );

        debug!(output_len = output.len(), "mrkdwn announcement formatted");
        output
    }

    fn format_line(&self, change: &Change) -> String {
        let summary = escape(&change.summary);
        match (change.kind, &change.url) {
            (ChangeKind::Ticket, Some(url)) => {
                let mut line = format!("{} <{}|{}>", BULLET, url, summary);
                if let (Some(key), Some(secondary_url)) =
                    (&change.secondary_key, &change.secondary_url)
                {
                    line.push_str(&format!(" <{}|(#{})>", secondary_url, key));
                }
                line
            }
            (ChangeKind::Issue, Some(url)) => {
                format!("{} {} <{}|(#{})>", BULLET, summary, url, change.primary_key)
            }
            _ => format!("{} {}", BULLET, summary),
        }
    }
}

/// Render changes with the default branch format and an optional template
pub fn render(changes: &[Change], release_id: &str, custom_template: Option<&str>) -> String {
    let mut formatter = MrkdwnFormatter::new();
    if let Some(template) = custom_template {
        formatter = formatter.with_template(template);
    }
    formatter.format(changes, release_id)
}

/// Escape the three characters mrkdwn reserves for control sequences
pub(crate) fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Reverse [`escape`]
pub(crate) fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
