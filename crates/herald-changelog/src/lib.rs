//! Herald Changelog - Announcement generation for release branches
//!
//! This crate extracts ticket and issue references from commits, maps them to
//! announcement lines and renders those lines as chat-ready mrkdwn.

pub mod formatter;
pub mod generator;
pub mod parser;
pub mod types;

pub use formatter::{chunk, parse_announcement, render, AnnouncementFormatter, MrkdwnFormatter};
pub use generator::{map_commits, AnnouncementGenerator};
pub use parser::{extract_references, CommitParser, ParserConfig, ReferenceParser};
pub use types::{Change, ChangeKind, ReferenceKind, ReferenceMatch, References};
