//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "herald.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "herald.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".herald.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".herald.toml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Herald Configuration
# Tokens may be supplied via HERALD_GITHUB_TOKEN and HERALD_SLACK_TOKEN instead.

tickets:
  project_key: PROJ
  url_base: https://example.atlassian.net

issues:
  url_base: https://github.com/example/app

source:
  owner: example
  repo: app
  api_url: https://api.github.com

release:
  branch_format: "release/{release}"

announcement:
  keep_unreferenced: false
  max_chunk_length: 3000
  max_token_bytes: 1900
  # template: "Release {{releaseNumber}} shipped with {{changeCount}} changes"
  # default_channel: C0123456789

slack:
  api_url: https://slack.com/api

server:
  listen_addr: "0.0.0.0:3000"
  rate_limit:
    max_requests: 10
    window_secs: 60
"#;
