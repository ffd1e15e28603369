//! Herald Core - Core library for release announcements
//!
//! This crate provides the foundational types, error handling and
//! configuration shared by the Herald crates.

pub mod config;
pub mod error;
pub mod types;

pub use error::{HeraldError, ReleaseError, Result, SourceError};
pub use types::{Destination, PendingAnnouncement};
