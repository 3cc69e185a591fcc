//! Beta access configuration

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::foundation::Timestamp;

use super::error::ValidationError;

/// Beta configuration (redemption codes)
///
/// Codes arrive as a single environment value of the form
/// `CODE=2026-09-30,OTHER=2026-12-31`; each date is the last day the
/// code grants access, inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BetaConfig {
    /// Comma-separated `CODE=YYYY-MM-DD` entries
    #[serde(default)]
    pub codes: String,
}

impl BetaConfig {
    /// Parse the configured codes into (code, expiry) pairs
    ///
    /// Expiry lands at the end of the named day so a code stays usable
    /// through its printed date.
    pub fn code_grants(&self) -> Result<Vec<(String, Timestamp)>, ValidationError> {
        let mut grants = Vec::new();
        for entry in self.codes.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (code, date) = entry
                .split_once('=')
                .ok_or_else(|| ValidationError::InvalidBetaCode(entry.to_string()))?;
            let code = code.trim();
            if code.is_empty() {
                return Err(ValidationError::InvalidBetaCode(entry.to_string()));
            }
            let expires_at = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(23, 59, 59))
                .map(|dt| Timestamp::from_datetime(dt.and_utc()))
                .ok_or_else(|| ValidationError::InvalidBetaCode(entry.to_string()))?;
            grants.push((code.to_string(), expires_at));
        }
        Ok(grants)
    }

    /// Validate beta configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.code_grants()?;
        Ok(())
    }
}
