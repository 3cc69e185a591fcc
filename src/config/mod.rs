//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `QUILLFLOW_` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use quillflow_entitlements::config::EntitlementsConfig;
//!
//! let config = EntitlementsConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Grace period: {} days", config.billing.grace_days);
//! ```

mod beta;
mod billing;
mod error;

pub use beta::BetaConfig;
pub use billing::BillingConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root configuration for the entitlement engine
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntitlementsConfig {
    /// Billing configuration (grace policy, concurrency, reminders)
    #[serde(default)]
    pub billing: BillingConfig,

    /// Beta configuration (redemption codes)
    #[serde(default)]
    pub beta: BetaConfig,
}

impl EntitlementsConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `QUILLFLOW` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `QUILLFLOW__BILLING__GRACE_DAYS=7` -> `billing.grace_days = 7`
    /// - `QUILLFLOW__BETA__CODES=EARLYBIRD=2026-09-30` -> `beta.codes = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("QUILLFLOW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.billing.validate()?;
        self.beta.validate()?;
        Ok(())
    }
}
