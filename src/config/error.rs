//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("AI model name cannot be empty")]
    EmptyAiModel,

    #[error("AI base URL must use http or https")]
    InvalidAiBaseUrl,

    #[error("Invalid AI request timeout")]
    InvalidAiTimeout,

    #[error("AI max retries must be at most {max}")]
    InvalidAiRetries { max: u32 },

    #[error("Minimum sessions for analytics must be at least 1")]
    InvalidMinimumSessions,

    #[error("Narrative deadline must be at least 1 second")]
    InvalidNarrativeDeadline,
}
