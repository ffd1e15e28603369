//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_references(config)?;
    validate_release(config)?;
    validate_announcement(config)?;
    validate_server(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn validate_references(config: &Config) -> Result<()> {
    let key = &config.tickets.project_key;
    if key.is_empty() {
        return Err(invalid("tickets.project_key", "project key cannot be empty").into());
    }
    if !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("tickets.project_key", "must be alphanumeric").into());
    }

    if config.tickets.url_base.is_empty() {
        return Err(invalid("tickets.url_base", "url base cannot be empty").into());
    }

    if config.issues.url_base.is_empty() {
        return Err(invalid("issues.url_base", "url base cannot be empty").into());
    }

    Ok(())
}

fn validate_release(config: &Config) -> Result<()> {
    if !config.release.branch_format.contains("{release}") {
        return Err(invalid("release.branch_format", "must contain {release} placeholder").into());
    }

    Ok(())
}

fn validate_announcement(config: &Config) -> Result<()> {
    // Truncated lines keep `max - 3` characters plus an ellipsis
    if config.announcement.max_chunk_length <= 3 {
        return Err(invalid("announcement.max_chunk_length", "must be greater than 3").into());
    }

    if config.announcement.max_token_bytes == 0 {
        return Err(invalid("announcement.max_token_bytes", "must be greater than 0").into());
    }

    Ok(())
}

fn validate_server(config: &Config) -> Result<()> {
    if config.server.rate_limit.window_secs == 0 {
        return Err(invalid("server.rate_limit.window_secs", "must be greater than 0").into());
    }

    Ok(())
}
