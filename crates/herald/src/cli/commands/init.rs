//! Init command

use std::path::PathBuf;

use clap::Args;
use console::style;
use dialoguer::{Confirm, Input, Select};
use tracing::info;

use herald_core::config::defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_YAML};
use herald_core::config::{validate_config, Config};

use crate::cli::Cli;

/// Initialize a new Herald configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_YAML));

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        let (format, content) = if self.yes {
            ("yaml", DEFAULT_CONFIG_TEMPLATE.to_string())
        } else {
            let formats = ["yaml", "toml"];
            let selection = Select::new()
                .with_prompt("Configuration format")
                .items(&formats)
                .default(0)
                .interact()?;
            let config = prompt_config()?;
            (formats[selection], render_config(&config, formats[selection])?)
        };

        let config_path = with_format_extension(config_path, format);
        std::fs::write(&config_path, &content)?;

        if !cli.quiet {
            println!(
                "{} Created configuration at {}",
                style("✓").green().bold(),
                style(config_path.display()).cyan()
            );
            println!();
            println!("Next steps:");
            println!("  1. Set {} and {}", style("HERALD_GITHUB_TOKEN").cyan(), style("HERALD_SLACK_TOKEN").cyan());
            println!("  2. Run {} to check the output locally", style("herald preview <release>").cyan());
            println!("  3. Run {} and point your Slack app at it", style("herald serve").cyan());
        }

        Ok(())
    }
}

/// Ask for the values that differ for every team
fn prompt_config() -> anyhow::Result<Config> {
    let mut config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE)?;

    config.tickets.project_key = Input::new()
        .with_prompt("Ticket project key")
        .default(config.tickets.project_key)
        .interact_text()?;
    config.tickets.url_base = Input::new()
        .with_prompt("Ticket tracker URL")
        .default(config.tickets.url_base)
        .interact_text()?;
    config.source.owner = Input::new()
        .with_prompt("Repository owner")
        .default(config.source.owner)
        .interact_text()?;
    config.source.repo = Input::new()
        .with_prompt("Repository name")
        .default(config.source.repo)
        .interact_text()?;
    config.issues.url_base = format!("https://github.com/{}/{}", config.source.owner, config.source.repo);

    validate_config(&config)?;
    Ok(config)
}

fn render_config(config: &Config, format: &str) -> anyhow::Result<String> {
    Ok(if format == "toml" {
        toml::to_string_pretty(config)?
    } else {
        serde_yaml::to_string(config)?
    })
}

fn with_format_extension(path: PathBuf, format: &str) -> PathBuf {
    if format == "toml" && path.extension().is_some_and(|e| e == "yaml") {
        path.with_extension("toml")
    } else {
        path
    }
}
