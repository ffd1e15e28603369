//! CLI commands

mod completions;
mod init;
mod preview;
mod previous;
mod serve;

pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use preview::PreviewCommand;
pub use previous::PreviousCommand;
pub use serve::ServeCommand;
