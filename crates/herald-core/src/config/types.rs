//! Configuration types

use serde::{Deserialize, Serialize};

/// Environment variable overriding `source.token`
pub const GITHUB_TOKEN_ENV: &str = "HERALD_GITHUB_TOKEN";

/// Environment variable overriding `slack.bot_token`
pub const SLACK_TOKEN_ENV: &str = "HERALD_SLACK_TOKEN";

/// Main configuration for Herald
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Issue tracker configuration
    pub tickets: TicketConfig,

    /// Code host issue/PR configuration
    pub issues: IssueConfig,

    /// Commit source configuration
    pub source: SourceConfig,

    /// Release branch configuration
    pub release: ReleaseConfig,

    /// Announcement rendering configuration
    pub announcement: AnnouncementConfig,

    /// Chat platform configuration
    pub slack: SlackConfig,

    /// Webhook server configuration
    pub server: ServerConfig,
}

impl Config {
    /// Apply token overrides from the environment
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(token) = std::env::var(GITHUB_TOKEN_ENV) {
            if !token.is_empty() {
                self.source.token = Some(token);
            }
        }
        if let Ok(token) = std::env::var(SLACK_TOKEN_ENV) {
            if !token.is_empty() {
                self.slack.bot_token = Some(token);
            }
        }
        self
    }
}

/// Issue tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketConfig {
    /// Project key tickets are filed under (e.g., "ABC" for ABC-123)
    pub project_key: String,

    /// Base URL of the tracker; tickets live under `{url_base}/browse/{key}`
    pub url_base: String,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            project_key: "PROJ".to_string(),
            url_base: "https://example.atlassian.net".to_string(),
        }
    }
}

/// Code host issue/PR configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueConfig {
    /// Base URL of the repository; PRs live under `{url_base}/pull/{number}`
    pub url_base: String,
}

impl Default for IssueConfig {
    fn default() -> Self {
        Self {
            url_base: "https://github.com/example/app".to_string(),
        }
    }
}

/// Commit source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Repository owner
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// API base URL
    pub api_url: String,

    /// API token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            owner: "example".to_string(),
            repo: "app".to_string(),
            api_url: "https://api.github.com".to_string(),
            token: None,
        }
    }
}

/// Release branch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Branch name format (e.g., "release/{release}")
    pub branch_format: String,
}

impl ReleaseConfig {
    /// Branch name for a release id
    pub fn branch_for(&self, release_id: &str) -> String {
        self.branch_format.replace("{release}", release_id)
    }
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            branch_format: "release/{release}".to_string(),
        }
    }
}

/// Announcement rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnouncementConfig {
    /// Keep commits that reference neither a ticket nor an issue
    pub keep_unreferenced: bool,

    /// Custom message template (`{{releaseNumber}}`, `{{changeCount}}`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Maximum characters per published message
    pub max_chunk_length: usize,

    /// Maximum bytes of selection state carried through the preview
    pub max_token_bytes: usize,

    /// Channel to publish to when the command names none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_channel: Option<String>,
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            keep_unreferenced: false,
            template: None,
            max_chunk_length: 3000,
            max_token_bytes: 1900,
            default_channel: None,
        }
    }
}

/// Chat platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Bot OAuth token (xoxb-...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,

    /// Web API base URL
    pub api_url: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_url: "https://slack.com/api".to_string(),
        }
    }
}

/// Webhook server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub listen_addr: String,

    /// Per-user rate limiting
    pub rate_limit: RateLimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    pub max_requests: u32,

    /// Window length in seconds
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_for() {
        let release = ReleaseConfig::default();
        assert_eq!(release.branch_for("42"), "release/42");
        assert_eq!(release.branch_for("2.1"), "release/2.1");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config =
            serde_yaml::from_str("tickets:\n  project_key: ABC\n").unwrap();
        assert_eq!(config.tickets.project_key, "ABC");
        assert_eq!(config.announcement.max_chunk_length, 3000);
        assert_eq!(config.server.rate_limit.max_requests, 10);
    }
}
