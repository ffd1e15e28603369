//! Flat release numbering
//!
//! Release ids are plain integers: 1, 2, 3...

use herald_core::error::{ReleaseError, Result};
use tracing::{debug, instrument};

use crate::traits::ReleaseStrategy;

/// Strategy for integer ids
#[derive(Debug, Clone, Default)]
pub struct FlatStrategy;

impl FlatStrategy {
    /// Create a new flat strategy
    pub fn new() -> Self {
        Self
    }
}

impl ReleaseStrategy for FlatStrategy {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn accepts(&self, release_id: &str) -> bool {
        !release_id.contains('.')
    }

    #[instrument(skip(self), fields(strategy = "flat"))]
    fn previous(&self, release_id: &str) -> Result<String> {
        let number: i64 = release_id
            .parse()
            .map_err(|_| ReleaseError::InvalidFormat(release_id.to_string()))?;

        // Release 1 is the first; nothing precedes it.
        if number <= 1 {
            return Err(ReleaseError::Underflow(release_id.to_string()).into());
        }

        let previous = (number - 1).to_string();
        debug!(release_id, previous, "decremented release number");
        Ok(previous)
    }
}
