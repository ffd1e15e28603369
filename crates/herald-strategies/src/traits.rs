//! Release strategy traits

use herald_core::error::Result;

/// Trait for release numbering strategies
pub trait ReleaseStrategy: Send + Sync {
    /// Get the name of this strategy
    fn name(&self) -> &'static str;

    /// Check if this strategy handles the shape of `release_id`
    fn accepts(&self, release_id: &str) -> bool;

    /// Compute the release that precedes `release_id`
    fn previous(&self, release_id: &str) -> Result<String>;
}
