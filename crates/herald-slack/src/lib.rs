//! Slack integration for Herald.
//!
//! This crate provides:
//! - Block Kit message types and a message builder
//! - Slash command payloads and `/announce` argument parsing
//! - Interaction payloads (checkbox state, button actions)
//! - The selection token that carries a pending announcement through the
//!   preview round trip
//! - Preview message assembly
//! - Publishing through `chat.postMessage`

pub mod codec;
pub mod commands;
pub mod error;
pub mod interactions;
pub mod messages;
pub mod preview;
pub mod publisher;

pub use codec::{decode_selection_token, encode_selection_token, reconcile_selection, SelectionToken};
pub use commands::{parse_announce_text, AnnounceRequest, SlashCommandPayload, SlashCommandResponse};
pub use error::{SlackError, SlackResult};
pub use interactions::InteractionPayload;
pub use messages::{SlackBlock, SlackMessageBuilder, SlackMessageContent};
pub use preview::{build_preview, PreviewOptions};
pub use publisher::{PublishSink, SlackPublisher};
