//! Announcement generation

use std::collections::HashSet;

use herald_core::config::Config;
use herald_git::CommitInfo;
use tracing::{debug, info, instrument};

use crate::formatter::{AnnouncementFormatter, MrkdwnFormatter};
use crate::parser::{CommitParser, ParserConfig, ReferenceParser};
use crate::types::Change;

/// Turns a commit range into announcement lines and renders them
pub struct AnnouncementGenerator {
    parser: Box<dyn CommitParser>,
    formatter: Box<dyn AnnouncementFormatter>,
}

impl AnnouncementGenerator {
    /// Create a new generator with the reference parser and mrkdwn formatter
    pub fn new(config: ParserConfig) -> Self {
        Self {
            parser: Box::new(ReferenceParser::new(config)),
            formatter: Box::new(MrkdwnFormatter::new()),
        }
    }

    /// Create a generator from the loaded configuration
    pub fn from_config(config: &Config) -> Self {
        let parser_config = ParserConfig::new(
            &config.tickets.project_key,
            &config.tickets.url_base,
            &config.issues.url_base,
        )
        .with_unreferenced(config.announcement.keep_unreferenced);

        let mut formatter = MrkdwnFormatter::new().with_branch_format(&config.release.branch_format);
        if let Some(template) = &config.announcement.template {
            formatter = formatter.with_template(template);
        }

        Self::new(parser_config).with_formatter(formatter)
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom formatter
    pub fn with_formatter<F: AnnouncementFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Map commits to announcement lines.
    ///
    /// Commits are deduplicated by short id, keeping the first occurrence.
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn generate(&self, commits: &[CommitInfo]) -> Vec<Change> {
        info!(commit_count = commits.len(), "mapping commits to changes");
        let mut seen = HashSet::new();

        let changes: Vec<Change> = commits
            .iter()
            .filter(|c| seen.insert(c.short_id.as_str()))
            .filter_map(|c| self.parser.parse(c))
            .collect();

        debug!(
            unique_commits = seen.len(),
            change_count = changes.len(),
            "changes mapped"
        );
        changes
    }

    /// Render announcement lines
    pub fn format(&self, changes: &[Change], release_id: &str) -> String {
        self.formatter.format(changes, release_id)
    }

    /// Generate and format in one step
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn generate_formatted(&self, release_id: &str, commits: &[CommitInfo]) -> String {
        let changes = self.generate(commits);
        let output = self.format(&changes, release_id);
        debug!(output_len = output.len(), "announcement formatted");
        output
    }
}

/// Map commits to announcement lines with the reference parser
pub fn map_commits(
    commits: &[CommitInfo],
    project_key: &str,
    ticket_url_base: &str,
    issue_url_base: &str,
    keep_unreferenced: bool,
) -> Vec<Change> {
    let config = ParserConfig::new(project_key, ticket_url_base, issue_url_base)
        .with_unreferenced(keep_unreferenced);
    AnnouncementGenerator::new(config).generate(commits)
}
