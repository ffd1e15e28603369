//! Error types for Herald

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using HeraldError
pub type Result<T> = std::result::Result<T, HeraldError>;

/// Main error type for Herald operations
#[derive(Debug, Error)]
pub enum HeraldError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Release identifier errors
    #[error(transparent)]
    Release(#[from] ReleaseError),

    /// Commit source errors
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Publishing errors
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Release identifier errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReleaseError {
    /// Release id is neither dotted nor a plain integer
    #[error("Invalid release format: {0}")]
    InvalidFormat(String),

    /// No earlier release exists
    #[error("No release precedes {0}")]
    Underflow(String),
}

/// Commit source errors
#[derive(Debug, Error)]
pub enum SourceError {
    /// One of the compared refs does not exist
    #[error("Could not compare {base}...{head}: ref not found")]
    NotFound { base: String, head: String },

    /// Transport failure talking to the code host
    #[error("Request to code host failed: {0}")]
    Request(String),

    /// Code host answered with an unexpected status
    #[error("Code host returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Publishing errors
#[derive(Debug, Error)]
pub enum PublishError {
    /// Transport failure talking to the chat platform
    #[error("Request to chat platform failed: {0}")]
    Request(String),

    /// Chat platform rejected the message
    #[error("Chat platform error: {0}")]
    Api(String),

    /// No token configured
    #[error("No bot token configured")]
    MissingToken,
}

impl HeraldError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Whether this error came from resolving or fetching the release itself,
    /// as opposed to infrastructure trouble
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Release(_) | Self::Source(SourceError::NotFound { .. })
        )
    }
}
