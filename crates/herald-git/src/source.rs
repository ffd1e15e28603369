//! Commit source abstraction

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{info, instrument};

use herald_core::error::SourceError;

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

/// Lists the commits between two refs of a repository
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Get the name of this source
    fn name(&self) -> &'static str;

    /// Commits reachable from `head` but not from `base`, oldest first.
    ///
    /// Fails with [`SourceError::NotFound`] when either ref does not exist.
    async fn compare(&self, owner: &str, repo: &str, base: &str, head: &str)
        -> Result<Vec<CommitInfo>>;
}

/// Commit source backed by a repository on disk.
///
/// `owner` and `repo` are ignored; the configured path decides the repository.
#[derive(Debug, Clone)]
pub struct LocalRepoSource {
    path: PathBuf,
}

impl LocalRepoSource {
    /// Create a source for the repository containing `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CommitSource for LocalRepoSource {
    fn name(&self) -> &'static str {
        "local"
    }

    #[instrument(skip(self, _owner, _repo), fields(path = %self.path.display()))]
    async fn compare(
        &self,
        _owner: &str,
        _repo: &str,
        base: &str,
        head: &str,
    ) -> Result<Vec<CommitInfo>> {
        info!(base, head, "comparing local refs");
        let path = self.path.clone();
        let base = base.to_string();
        let head = head.to_string();

        tokio::task::spawn_blocking(move || {
            let repo = GitRepo::discover(&path)?;
            repo.commits_between(&base, &head)
        })
        .await
        .map_err(|e| SourceError::Request(format!("git worker failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_source_missing_refs() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree = repo
            .find_tree(repo.index().unwrap().write_tree().unwrap())
            .unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();

        let source = LocalRepoSource::new(temp.path());
        let err = source
            .compare("acme", "app", "release/1", "release/2")
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
        assert_eq!(source.name(), "local");
    }
}
