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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Grace period must be between 0 and 90 days")]
    InvalidGraceDays,

    #[error("Concurrent-update retry limit must be at least 1")]
    InvalidRetryLimit,

    #[error("Reminder lead days must be positive and strictly decreasing")]
    InvalidReminderLeadDays,

    #[error("Malformed beta code entry: {0}")]
    InvalidBetaCode(String),
}
