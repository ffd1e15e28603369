//! Strategy registry and release resolution

use std::sync::Arc;

use herald_core::error::{ReleaseError, Result};
use tracing::debug;

use crate::dotted::DottedStrategy;
use crate::flat::FlatStrategy;
use crate::traits::ReleaseStrategy;

/// Registry of available release strategies.
///
/// Strategies are consulted in registration order; the first one that
/// accepts an id resolves it.
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn ReleaseStrategy>>,
}

impl StrategyRegistry {
    /// Create a new registry with all built-in strategies
    pub fn new() -> Self {
        Self {
            strategies: vec![Arc::new(DottedStrategy::new()), Arc::new(FlatStrategy::new())],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Register a strategy
    pub fn register<S: ReleaseStrategy + 'static>(&mut self, strategy: S) {
        self.strategies.push(Arc::new(strategy));
    }

    /// Get strategy by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ReleaseStrategy>> {
        let result = self.strategies.iter().find(|s| s.name() == name).cloned();
        debug!(
            strategy = name,
            found = result.is_some(),
            "strategy registry lookup"
        );
        result
    }

    /// Get the strategy that handles `release_id`
    pub fn for_release(&self, release_id: &str) -> Option<Arc<dyn ReleaseStrategy>> {
        self.strategies
            .iter()
            .find(|s| s.accepts(release_id))
            .cloned()
    }

    /// Get strategy names
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Compute the release preceding `release_id`
    pub fn previous(&self, release_id: &str) -> Result<String> {
        let release_id = release_id.trim();
        let strategy = self
            .for_release(release_id)
            .ok_or_else(|| ReleaseError::InvalidFormat(release_id.to_string()))?;
        debug!(release_id, strategy = strategy.name(), "resolving previous release");
        strategy.previous(release_id)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the release preceding `release_id` with the built-in strategies
pub fn previous_release(release_id: &str) -> Result<String> {
    StrategyRegistry::new().previous(release_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::HeraldError;

    #[test]
    fn test_default_registry_has_builtins() {
        let registry = StrategyRegistry::new();
        assert_eq!(registry.names(), vec!["dotted", "flat"]);
        assert!(registry.get("dotted").is_some());
        assert!(registry.get("semver").is_none());
    }

    #[test]
    fn test_dispatch_by_shape() {
        let registry = StrategyRegistry::new();
        assert_eq!(registry.for_release("1.5").unwrap().name(), "dotted");
        assert_eq!(registry.for_release("15").unwrap().name(), "flat");
    }

    #[test]
    fn test_previous_release() {
        assert_eq!(previous_release("2").unwrap(), "1");
        assert_eq!(previous_release("2.0").unwrap(), "1");
        assert_eq!(previous_release("2.1.0").unwrap(), "2.0");
        assert_eq!(previous_release("1.5").unwrap(), "1.4");
        assert_eq!(previous_release(" 42 ").unwrap(), "41");
    }

    #[test]
    fn test_previous_release_errors() {
        assert!(matches!(
            previous_release("1"),
            Err(HeraldError::Release(ReleaseError::Underflow(_)))
        ));
        assert!(matches!(
            previous_release("abc"),
            Err(HeraldError::Release(ReleaseError::InvalidFormat(_)))
        ));
        assert!(matches!(
            previous_release("a.b"),
            Err(HeraldError::Release(ReleaseError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_empty_registry_rejects_everything() {
        let registry = StrategyRegistry::empty();
        assert!(matches!(
            registry.previous("3"),
            Err(HeraldError::Release(ReleaseError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_register_custom() {
        let mut registry = StrategyRegistry::empty();
        registry.register(FlatStrategy::new());
        assert_eq!(registry.previous("8").unwrap(), "7");
        assert!(registry.previous("8.1").is_err());
    }
}
