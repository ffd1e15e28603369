//! Commit parsing

mod references;

pub use references::{clean_title, extract_references, ReferenceExtractor};

use herald_git::CommitInfo;

use crate::types::Change;

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Turn a commit into an announcement line, or `None` to drop it
    fn parse(&self, commit: &CommitInfo) -> Option<Change>;
}

/// Settings for [`ReferenceParser`]
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Ticket project key (e.g., "ABC")
    pub project_key: String,
    /// Issue tracker base URL
    pub ticket_url_base: String,
    /// Code host repository base URL
    pub issue_url_base: String,
    /// Keep commits with no reference as plain lines
    pub keep_unreferenced: bool,
}

impl ParserConfig {
    /// Create a new parser config
    pub fn new(
        project_key: impl Into<String>,
        ticket_url_base: impl Into<String>,
        issue_url_base: impl Into<String>,
    ) -> Self {
        Self {
            project_key: project_key.into(),
            ticket_url_base: ticket_url_base.into(),
            issue_url_base: issue_url_base.into(),
            keep_unreferenced: false,
        }
    }

    /// Set whether to keep unreferenced commits
    pub fn with_unreferenced(mut self, keep: bool) -> Self {
        self.keep_unreferenced = keep;
        self
    }
}

/// Parser that links commits to tickets, falling back to issue numbers.
///
/// A ticket always wins the primary link; a co-occurring issue number is
/// demoted to a secondary annotation.
pub struct ReferenceParser {
    extractor: ReferenceExtractor,
    config: ParserConfig,
}

impl ReferenceParser {
    /// Create a parser with the given configuration
    pub fn new(config: ParserConfig) -> Self {
        Self {
            extractor: ReferenceExtractor::new(&config.project_key),
            config,
        }
    }

    fn ticket_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.config.ticket_url_base, key)
    }

    fn issue_url(&self, number: &str) -> String {
        format!("{}/pull/{}", self.config.issue_url_base, number)
    }
}

impl CommitParser for ReferenceParser {
    fn parse(&self, commit: &CommitInfo) -> Option<Change> {
        let refs = self.extractor.extract(&commit.searchable_text());
        let first_issue = refs.issue_keys.first();

        let change = if let Some(key) = refs.ticket_keys.first() {
            let change = Change::ticket(key, clean_title(&commit.title), self.ticket_url(key));
            match first_issue {
                Some(number) => change.with_secondary(number, self.issue_url(number)),
                None => change,
            }
        } else if let Some(number) = first_issue {
            Change::issue(number, clean_title(&commit.title), self.issue_url(number))
        } else if self.config.keep_unreferenced {
            Change::plain(&commit.short_id, &commit.title)
        } else {
            return None;
        };

        Some(change.with_commit(&commit.short_id, &commit.author_name))
    }
}
