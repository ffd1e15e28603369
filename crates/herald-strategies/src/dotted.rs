//! Dotted release numbering
//!
//! Release ids look like `MAJOR.MINOR` (extra segments are ignored).
//! The previous release of `2.3` is `2.2`. When the minor segment is zero,
//! missing or not a number, the major segment is decremented and returned
//! bare: the previous release of `2.0` is `2`'s predecessor, `1`, not `1.0`.
//! Branch lookups depend on that exact shape.

use tracing::{debug, instrument};

use herald_core::error::{ReleaseError, Result};

use crate::traits::ReleaseStrategy;

/// Strategy for ids containing a `.`
#[derive(Debug, Clone, Default)]
pub struct DottedStrategy;

impl DottedStrategy {
    /// Create a new dotted strategy
    pub fn new() -> Self {
        Self
    }
}

impl ReleaseStrategy for DottedStrategy {
    fn name(&self) -> &'static str {
        "dotted"
    }

    fn accepts(&self, release_id: &str) -> bool {
        release_id.contains('.')
    }

    #[instrument(skip(self), fields(strategy = "dotted"))]
    fn previous(&self, release_id: &str) -> Result<String> {
        let segments: Vec<&str> = release_id.split('.').collect();
        let first = segments[0];

        if let Some(minor) = segments.get(1).and_then(|s| s.parse::<u64>().ok()) {
            if minor > 0 {
                let previous = format!("{}.{}", first, minor - 1);
                debug!(release_id, previous, "decremented minor segment");
                return Ok(previous);
            }
        }

        let major: u64 = first
            .parse()
            .map_err(|_| ReleaseError::InvalidFormat(release_id.to_string()))?;
        if major == 0 {
            return Err(ReleaseError::Underflow(release_id.to_string()).into());
        }

        let previous = (major - 1).to_string();
        debug!(release_id, previous, "decremented major segment");
        Ok(previous)
    }
}
