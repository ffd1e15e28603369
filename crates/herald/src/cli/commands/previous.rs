//! Previous release command

use clap::Args;
use console::style;
use tracing::info;

use herald_core::config::load_config_or_default;
use herald_strategies::previous_release;

use crate::cli::output::version_style;
use crate::cli::{Cli, OutputFormat};

/// Print the release preceding a release id
#[derive(Debug, Args)]
pub struct PreviousCommand {
    /// Release id (`42`, `3.1`, ...)
    pub release: String,

    /// Also print the branches that would be compared
    #[arg(long)]
    pub branches: bool,
}

impl PreviousCommand {
    /// Execute the previous command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(release = %self.release, "executing previous command");
        let previous = previous_release(&self.release)?;

        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd)?;
        let base = config.release.branch_for(&previous);
        let head = config.release.branch_for(self.release.trim());

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "release": self.release.trim(),
                    "previous": previous,
                    "base": base,
                    "head": head,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                println!("{}", version_style().apply_to(&previous));
                if self.branches && !cli.quiet {
                    println!("  {} {}...{}", style("compare").dim(), base, head);
                }
            }
        }

        Ok(())
    }
}
