//! Herald Git - Commit sources for release announcements
//!
//! This crate provides the commit data model and the sources that list the
//! commits between two release branches, either from a local repository or
//! from a code host's compare API.

mod commits;
mod github;
mod repository;
mod source;
pub mod types;

pub use github::GitHubSource;
pub use repository::{GitRepo, Result};
pub use source::{CommitSource, LocalRepoSource};
pub use types::CommitInfo;
