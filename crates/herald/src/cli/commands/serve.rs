//! Serve command

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use console::style;
use tracing::{info, warn};

use herald_core::config::{load_config_or_default, Config};
use herald_git::{CommitSource, GitHubSource, LocalRepoSource};
use herald_slack::SlackPublisher;

use crate::announcer::Announcer;
use crate::cli::output::key_value;
use crate::cli::Cli;
use crate::server::{serve, AppState};

/// Run the Slack webhook server
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to listen on (overrides `server.listen_addr`)
    #[arg(short, long, env = "HERALD_LISTEN_ADDR")]
    pub listen: Option<String>,

    /// Read commits from a local repository instead of the GitHub API
    #[arg(long, value_name = "PATH")]
    pub local: Option<PathBuf>,
}

impl ServeCommand {
    /// Execute the serve command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        let (config, config_path) = load_config_or_default(&cwd)?;
        let config = config.with_env_overrides();
        match &config_path {
            Some(path) => info!(path = %path.display(), "using configuration file"),
            None => warn!("no configuration file found, using defaults"),
        }
        if config.slack.bot_token.is_none() {
            warn!("no Slack bot token configured; publishing will fail");
        }

        let listen_addr = self
            .listen
            .clone()
            .unwrap_or_else(|| config.server.listen_addr.clone());
        let source = self.commit_source(&config);
        let publisher = Arc::new(SlackPublisher::with_api_url(
            &config.slack.api_url,
            config.slack.bot_token.clone(),
        ));

        if !cli.quiet {
            println!("{}", style("Herald webhook server").bold());
            println!("{}", key_value("listen", &listen_addr));
            println!("{}", key_value("source", source.name()));
            println!(
                "{}",
                key_value("repository", &format!("{}/{}", config.source.owner, config.source.repo))
            );
        }

        let state = Arc::new(AppState::new(Announcer::new(config, source), publisher));
        serve(state, &listen_addr).await
    }

    fn commit_source(&self, config: &Config) -> Arc<dyn CommitSource> {
        match &self.local {
            Some(path) => Arc::new(LocalRepoSource::new(path)),
            None => Arc::new(GitHubSource::with_api_url(
                &config.source.api_url,
                config.source.token.clone(),
            )),
        }
    }
}
