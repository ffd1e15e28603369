//! Release announcement pipeline
//!
//! Resolves the previous release, lists the commits between the two release
//! branches and maps them to announcement lines.

use std::sync::Arc;

use herald_changelog::{chunk, AnnouncementFormatter, AnnouncementGenerator, Change, MrkdwnFormatter};
use herald_core::config::Config;
use herald_core::{Destination, PendingAnnouncement, Result};
use herald_git::CommitSource;
use herald_strategies::StrategyRegistry;
use tracing::{info, instrument};

/// A pending announcement together with the text shown in its preview
#[derive(Debug, Clone)]
pub struct Draft {
    pub pending: PendingAnnouncement<Change>,
    pub preview_text: String,
}

/// Runs the announcement pipeline against a commit source
pub struct Announcer {
    config: Config,
    source: Arc<dyn CommitSource>,
    strategies: StrategyRegistry,
    generator: AnnouncementGenerator,
    preview_formatter: MrkdwnFormatter,
}

impl Announcer {
    /// Create an announcer for the given configuration and source
    pub fn new(config: Config, source: Arc<dyn CommitSource>) -> Self {
        let generator = AnnouncementGenerator::from_config(&config);
        let preview_formatter =
            MrkdwnFormatter::new().with_branch_format(&config.release.branch_format);
        Self {
            config,
            source,
            strategies: StrategyRegistry::new(),
            generator,
            preview_formatter,
        }
    }

    /// Loaded configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Name of the previous release
    pub fn previous_release(&self, release_id: &str) -> Result<String> {
        self.strategies.previous(release_id)
    }

    /// Collect the changes that went into `release_id`
    #[instrument(skip(self, destination), fields(source = self.source.name()))]
    pub async fn draft(&self, release_id: &str, destination: Destination) -> Result<Draft> {
        let previous = self.previous_release(release_id)?;
        let base = self.config.release.branch_for(&previous);
        let head = self.config.release.branch_for(release_id);
        info!(base, head, "drafting announcement");

        let commits = self
            .source
            .compare(&self.config.source.owner, &self.config.source.repo, &base, &head)
            .await?;
        let changes = self.generator.generate(&commits);
        let preview_text = self.preview_formatter.format(&changes, release_id);

        info!(
            commit_count = commits.len(),
            change_count = changes.len(),
            "announcement drafted"
        );
        Ok(Draft {
            pending: PendingAnnouncement::new(release_id, destination, changes),
            preview_text,
        })
    }

    /// Final announcement text. Unlike the preview, this honours the custom
    /// template.
    pub fn publishable_text(&self, changes: &[Change], release_id: &str) -> String {
        self.generator.format(changes, release_id)
    }

    /// Final announcement text, split to the configured message size
    pub fn publishable_chunks(&self, changes: &[Change], release_id: &str) -> Vec<String> {
        chunk(
            &self.publishable_text(changes, release_id),
            self.config.announcement.max_chunk_length,
        )
    }
}
