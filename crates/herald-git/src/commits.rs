//! Commit history operations

use chrono::{TimeZone, Utc};
use git2::{ErrorCode, Oid, Sort};
use tracing::{debug, instrument};

use herald_core::error::SourceError;

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Get the commits reachable from `head` but not from `base`, oldest first
    #[instrument(skip(self))]
    pub fn commits_between(&self, base: &str, head: &str) -> Result<Vec<CommitInfo>> {
        let not_found = || SourceError::NotFound {
            base: base.to_string(),
            head: head.to_string(),
        };
        let base_oid = self.resolve(base).map_err(|e| map_missing(e, not_found))?;
        let head_oid = self.resolve(head).map_err(|e| map_missing(e, not_found))?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)?;
        revwalk.push(head_oid)?;
        revwalk.hide(base_oid)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(commit_to_info(&commit));
        }

        debug!(count = commits.len(), "collected commits between refs");
        Ok(commits)
    }

    fn resolve(&self, rev: &str) -> std::result::Result<Oid, git2::Error> {
        Ok(self.repo.revparse_single(rev)?.peel_to_commit()?.id())
    }
}

fn map_missing(err: git2::Error, not_found: impl Fn() -> SourceError) -> SourceError {
    if err.code() == ErrorCode::NotFound {
        not_found()
    } else {
        SourceError::Git2(err)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let author = commit.author();
    let timestamp = Utc
        .timestamp_opt(author.when().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    CommitInfo::new(
        commit.id().to_string(),
        commit.message().unwrap_or("(no message)"),
        author.name().unwrap_or("Unknown"),
        timestamp,
    )
}
