//! Entitlement evaluation - the access decision table.
//!
//! Pure functions of account snapshot + current time. Safe to call
//! concurrently from any number of request-handling tasks; nothing here
//! mutates state or performs I/O.
//!
//! Decision table, first match by status:
//!
//! | status        | access rule                                   |
//! |---------------|-----------------------------------------------|
//! | beta_access   | `now <= beta_expires_at` (false if unset)     |
//! | trial, active | always true                                   |
//! | past_due      | `now <= current_period_end + grace`           |
//! | canceled      | `now <= current_period_end`                   |
//! | unpaid, none  | always false                                  |
//!
//! Beta access deliberately has no grace window; see the grace module.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{days_until, grace_window, Account, SubscriptionStatus, DEFAULT_GRACE_DAYS};

/// Days of beta runway above which messaging stays informational.
const BETA_COMFORT_DAYS: i64 = 30;

/// How urgent a status message is for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Human-readable entitlement status for the calling layer to render.
///
/// Entitlement denial is never a bare boolean; the message carries enough
/// context for an actionable prompt (upgrade, update payment method).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

impl StatusMessage {
    fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }
}

/// Access policy with the grace window length as its single knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitlementPolicy {
    pub grace_days: i64,
}

impl Default for EntitlementPolicy {
    fn default() -> Self {
        Self {
            grace_days: DEFAULT_GRACE_DAYS,
        }
    }
}

impl EntitlementPolicy {
    pub fn new(grace_days: i64) -> Self {
        Self { grace_days }
    }

    /// Whether the account may use the gated product right now.
    pub fn has_access(&self, account: &Account, now: Timestamp) -> bool {
        match account.subscription_status {
            SubscriptionStatus::BetaAccess => account
                .beta_expires_at
                .map(|expiry| now <= expiry)
                .unwrap_or(false),
            SubscriptionStatus::Trial | SubscriptionStatus::Active => true,
            SubscriptionStatus::PastDue => account
                .current_period_end
                .map(|end| grace_window(end, now, self.grace_days).active)
                .unwrap_or(false),
            SubscriptionStatus::Canceled => account
                .current_period_end
                .map(|end| now <= end)
                .unwrap_or(false),
            SubscriptionStatus::Unpaid | SubscriptionStatus::None => false,
        }
    }

    /// Presentation-ready status with day counts derived from the same
    /// instants as `has_access`. Idempotent under repeated calls.
    pub fn status_message(&self, account: &Account, now: Timestamp) -> StatusMessage {
        match account.subscription_status {
            SubscriptionStatus::BetaAccess => self.beta_message(account, now),
            SubscriptionStatus::Trial => match account.trial_ends_at {
                Some(end) if now <= end => StatusMessage::new(
                    Severity::Info,
                    format!("Trial ends in {} days", days_until(now, end)),
                ),
                _ => StatusMessage::new(Severity::Info, "Trial active"),
            },
            SubscriptionStatus::Active => match account.current_period_end {
                Some(end) => StatusMessage::new(
                    Severity::Success,
                    format!("Subscription active, renews in {} days", days_until(now, end)),
                ),
                None => StatusMessage::new(Severity::Success, "Subscription active"),
            },
            SubscriptionStatus::PastDue => self.past_due_message(account, now),
            SubscriptionStatus::Canceled => self.canceled_message(account, now),
            SubscriptionStatus::Unpaid => StatusMessage::new(
                Severity::Error,
                "Subscription unpaid. Update your payment method to restore access",
            ),
            SubscriptionStatus::None => {
                StatusMessage::new(Severity::Error, "No active subscription")
            }
        }
    }

    fn beta_message(&self, account: &Account, now: Timestamp) -> StatusMessage {
        let expiry = match account.beta_expires_at {
            Some(expiry) => expiry,
            None => {
                return StatusMessage::new(Severity::Error, "Beta access is not configured")
            }
        };
        if now <= expiry {
            let days = days_until(now, expiry);
            let severity = if days > BETA_COMFORT_DAYS {
                Severity::Info
            } else {
                Severity::Warning
            };
            StatusMessage::new(severity, format!("Beta access ends in {} days", days))
        } else {
            StatusMessage::new(
                Severity::Error,
                "Your beta access has ended. Subscribe to keep writing",
            )
        }
    }

    fn past_due_message(&self, account: &Account, now: Timestamp) -> StatusMessage {
        let end = match account.current_period_end {
            Some(end) => end,
            None => {
                return StatusMessage::new(
                    Severity::Error,
                    "Payment past due. Update your payment method to restore access",
                )
            }
        };
        let window = grace_window(end, now, self.grace_days);
        if window.active {
            StatusMessage::new(
                Severity::Warning,
                format!(
                    "Payment failed. Access ends in {} days unless your payment method is updated",
                    window.days_remaining
                ),
            )
        } else {
            StatusMessage::new(
                Severity::Error,
                "Access suspended after failed payments. Update your payment method",
            )
        }
    }

    fn canceled_message(&self, account: &Account, now: Timestamp) -> StatusMessage {
        match account.current_period_end {
            Some(end) if now <= end => StatusMessage::new(
                Severity::Warning,
                format!(
                    "Subscription canceled. Access ends in {} days",
                    days_until(now, end)
                ),
            ),
            _ => StatusMessage::new(
                Severity::Error,
                "Your subscription has ended. Resubscribe to keep writing",
            ),
        }
    }
}
