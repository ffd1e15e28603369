//! Preview command

use std::sync::Arc;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use herald_changelog::Change;
use herald_core::config::load_config_or_default;
use herald_core::Destination;
use herald_git::LocalRepoSource;

use crate::announcer::Announcer;
use crate::cli::{Cli, OutputFormat};

/// Render the announcement for a release from the local repository
#[derive(Debug, Args)]
pub struct PreviewCommand {
    /// Release to announce
    pub release: String,

    /// Split the output into messages as they would be published
    #[arg(long)]
    pub chunk: bool,

    /// Also list commits without any reference
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Serialize)]
struct PreviewOutput<'a> {
    release: &'a str,
    previous: String,
    changes: &'a [Change],
    messages: Vec<String>,
}

impl PreviewCommand {
    /// Execute the preview command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(release = %self.release, chunk = self.chunk, all = self.all, "executing preview command");
        let cwd = std::env::current_dir()?;
        let (mut config, _) = load_config_or_default(&cwd)?;
        if self.all {
            config.announcement.keep_unreferenced = true;
        }

        let announcer = Announcer::new(config, Arc::new(LocalRepoSource::new(&cwd)));
        let destination = Destination::new("local", "");

        let rt = tokio::runtime::Runtime::new()?;
        let draft = rt.block_on(announcer.draft(&self.release, destination))?;
        let changes = &draft.pending.changes;

        let messages = if self.chunk {
            announcer.publishable_chunks(changes, &self.release)
        } else {
            vec![announcer.publishable_text(changes, &self.release)]
        };

        match cli.format {
            OutputFormat::Json => {
                let output = PreviewOutput {
                    release: &self.release,
                    previous: announcer.previous_release(&self.release)?,
                    changes,
                    messages,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if changes.is_empty() && !cli.quiet {
                    eprintln!("{}", style("No referenced changes found.").yellow());
                }
                for (i, message) in messages.iter().enumerate() {
                    if i > 0 {
                        println!("{}", style("---").dim());
                    }
                    println!("{}", message);
                }
            }
        }

        Ok(())
    }
}
