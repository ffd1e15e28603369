//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::{CompletionsCommand, InitCommand, PreviewCommand, PreviousCommand, ServeCommand};

/// Herald - Release announcement bot
#[derive(Debug, Parser)]
#[command(name = "herald")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a new Herald configuration
    Init(InitCommand),

    /// Run the Slack webhook server
    Serve(ServeCommand),

    /// Render the announcement for a release from the local repository
    Preview(PreviewCommand),

    /// Print the release preceding a release id
    Previous(PreviousCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Console log level used when `RUST_LOG` is unset.
    ///
    /// `--quiet` wins over `--verbose`. Otherwise `serve` logs at info and
    /// every other command at warn.
    pub fn console_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else if matches!(self.command, Commands::Serve(_)) {
            "info"
        } else {
            "warn"
        }
    }

    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Serve(ref cmd) => cmd.execute(&self),
            Commands::Preview(ref cmd) => cmd.execute(&self),
            Commands::Previous(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_preview() {
        let cli = Cli::try_parse_from(["herald", "--format", "json", "preview", "42", "--chunk"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Preview(ref cmd) if cmd.release == "42" && cmd.chunk));
    }

    #[test]
    fn test_console_log_level() {
        let level = |args: &[&str]| Cli::try_parse_from(args).unwrap().console_log_level();

        assert_eq!(level(&["herald", "previous", "2"]), "warn");
        assert_eq!(level(&["herald", "serve"]), "info");
        assert_eq!(level(&["herald", "-v", "previous", "2"]), "debug");
        assert_eq!(level(&["herald", "serve", "--verbose"]), "debug");
        assert_eq!(level(&["herald", "-q", "-v", "serve"]), "error");
    }
}
