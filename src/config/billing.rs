//! Billing and dunning configuration

use serde::Deserialize;

use super::error::ValidationError;

fn default_grace_days() -> i64 {
    7
}

fn default_cas_max_retries() -> u32 {
    3
}

fn default_reminder_lead_days() -> String {
    "30,14,7,3,1".to_string()
}

/// Billing configuration (grace policy, concurrency, reminder schedule)
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Days of continued access after a past-due period ends
    #[serde(default = "default_grace_days")]
    pub grace_days: i64,

    /// Attempts before a concurrent-update conflict is surfaced
    #[serde(default = "default_cas_max_retries")]
    pub cas_max_retries: u32,

    /// Comma-separated lead times (days before beta expiry) for reminders
    #[serde(default = "default_reminder_lead_days")]
    pub reminder_lead_days: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            grace_days: default_grace_days(),
            cas_max_retries: default_cas_max_retries(),
            reminder_lead_days: default_reminder_lead_days(),
        }
    }
}

impl BillingConfig {
    /// Parse the reminder schedule into lead-day values
    pub fn reminder_schedule(&self) -> Result<Vec<i64>, ValidationError> {
        let mut days = Vec::new();
        for part in self.reminder_lead_days.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let day: i64 = part
                .parse()
                .map_err(|_| ValidationError::InvalidReminderLeadDays)?;
            if day < 1 {
                return Err(ValidationError::InvalidReminderLeadDays);
            }
            if let Some(&previous) = days.last() {
                if day >= previous {
                    return Err(ValidationError::InvalidReminderLeadDays);
                }
            }
            days.push(day);
        }
        if days.is_empty() {
            return Err(ValidationError::InvalidReminderLeadDays);
        }
        Ok(days)
    }

    /// Validate billing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0..=90).contains(&self.grace_days) {
            return Err(ValidationError::InvalidGraceDays);
        }
        if self.cas_max_retries == 0 {
            return Err(ValidationError::InvalidRetryLimit);
        }
        self.reminder_schedule()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BillingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reminder_schedule().unwrap(), vec![30, 14, 7, 3, 1]);
    }

    #[test]
    fn test_custom_schedule_parses() {
        let config = BillingConfig {
            reminder_lead_days: "14, 7, 1".to_string(),
            ..Default::default()
        };
        assert_eq!(config.reminder_schedule().unwrap(), vec![14, 7, 1]);
    }

    #[test]
    fn test_non_decreasing_schedule_is_rejected() {
        let config = BillingConfig {
            reminder_lead_days: "7,7,1".to_string(),
            ..Default::default()
        };
        assert!(config.reminder_schedule().is_err());
    }

    #[test]
    fn test_zero_lead_day_is_rejected() {
        let config = BillingConfig {
            reminder_lead_days: "7,0".to_string(),
            ..Default::default()
        };
        assert!(config.reminder_schedule().is_err());
    }

    #[test]
    fn test_negative_grace_days_are_rejected() {
        let config = BillingConfig {
            grace_days: -1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_retry_limit_is_rejected() {
        let config = BillingConfig {
            cas_max_retries: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
