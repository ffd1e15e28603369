//! Herald Strategies - Release numbering strategies
//!
//! This crate computes the release that precedes a given release id, for
//! dotted (`MAJOR.MINOR`) and flat integer numbering.

mod dotted;
mod flat;
mod registry;
mod traits;

pub use dotted::DottedStrategy;
pub use flat::FlatStrategy;
pub use registry::{previous_release, StrategyRegistry};
pub use traits::ReleaseStrategy;
