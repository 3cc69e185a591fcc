//! Inbound billing notification shape.
//!
//! The payment processor reports subscription state through notifications
//! of this shape, delivered at-least-once, possibly duplicated, possibly
//! out of order. Only fields relevant to reconciliation are captured;
//! everything else in the processor's payload is ignored.

use serde::{Deserialize, Serialize};

use crate::domain::entitlement::{SubscriptionPlan, SubscriptionStatus};
use crate::domain::foundation::Timestamp;

use super::ReconciliationError;

/// Failure payload attached to payment-failure notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    pub reason: String,
    /// Amount due in cents.
    pub amount_due: i64,
    pub invoice_id: String,
}

/// A billing-status notification after shape validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingNotification {
    /// Processor subscription object identifier.
    pub subscription_id: String,

    /// Processor price identifier.
    pub price_id: String,

    /// Reported subscription status, already mapped onto the local enum.
    pub status: SubscriptionStatus,

    pub current_period_start: Timestamp,
    pub current_period_end: Timestamp,
    pub cancel_at_period_end: bool,

    /// Trial end, when the subscription is or was trialing.
    pub trial_end: Option<Timestamp>,

    /// Explicit plan name, when the processor payload carries one.
    pub plan: Option<String>,

    /// Billing interval, used to derive the plan when `plan` is absent.
    pub interval: Option<String>,

    /// Set when the processor needs the customer to complete an action
    /// (for example 3-D Secure confirmation).
    pub requires_action: bool,

    /// Present on payment-failure notifications.
    pub failure: Option<FailureDetail>,
}

/// Raw wire shape before validation. Timestamps arrive as Unix seconds.
#[derive(Debug, Deserialize)]
struct RawNotification {
    subscription_id: Option<String>,
    price_id: Option<String>,
    status: Option<String>,
    current_period_start: Option<i64>,
    current_period_end: Option<i64>,
    #[serde(default)]
    cancel_at_period_end: bool,
    trial_end: Option<i64>,
    plan: Option<String>,
    interval: Option<String>,
    #[serde(default)]
    requires_action: bool,
    failure: Option<FailureDetail>,
}

impl BillingNotification {
    /// Validates a raw processor payload into a well-formed notification.
    ///
    /// # Errors
    ///
    /// `MissingField` for absent required fields, `InvalidStatus` for
    /// status values outside the processor vocabulary. Rejected payloads
    /// cause no state change.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ReconciliationError> {
        let raw: RawNotification = serde_json::from_value(value)
            .map_err(|_| ReconciliationError::MissingField("payload"))?;

        let subscription_id = raw
            .subscription_id
            .filter(|s| !s.is_empty())
            .ok_or(ReconciliationError::MissingField("subscription_id"))?;
        let price_id = raw
            .price_id
            .filter(|s| !s.is_empty())
            .ok_or(ReconciliationError::MissingField("price_id"))?;
        let status_str = raw
            .status
            .ok_or(ReconciliationError::MissingField("status"))?;
        let status = SubscriptionStatus::from_processor_str(&status_str)
            .map_err(|_| ReconciliationError::InvalidStatus(status_str))?;

        let current_period_start = raw
            .current_period_start
            .and_then(Timestamp::from_unix_secs)
            .ok_or(ReconciliationError::MissingField("current_period_start"))?;
        let current_period_end = raw
            .current_period_end
            .and_then(Timestamp::from_unix_secs)
            .ok_or(ReconciliationError::MissingField("current_period_end"))?;

        Ok(Self {
            subscription_id,
            price_id,
            status,
            current_period_start,
            current_period_end,
            cancel_at_period_end: raw.cancel_at_period_end,
            trial_end: raw.trial_end.and_then(Timestamp::from_unix_secs),
            plan: raw.plan,
            interval: raw.interval,
            requires_action: raw.requires_action,
            failure: raw.failure,
        })
    }

    /// Plan derived from the explicit plan field if present, else from
    /// the billing interval.
    pub fn effective_plan(&self) -> Option<SubscriptionPlan> {
        if let Some(name) = self.plan.as_deref() {
            if let Some(plan) = SubscriptionPlan::from_name(name) {
                return Some(plan);
            }
        }
        self.interval
            .as_deref()
            .map(SubscriptionPlan::from_interval)
    }
}

/// Builder for test notifications.
#[cfg(test)]
pub struct BillingNotificationBuilder {
    notification: BillingNotification,
}

#[cfg(test)]
impl BillingNotificationBuilder {
    pub fn new(status: SubscriptionStatus, period_start: Timestamp) -> Self {
        Self {
            notification: BillingNotification {
                subscription_id: "sub_test_123".to_string(),
                price_id: "price_test_123".to_string(),
                status,
                current_period_start: period_start,
                current_period_end: period_start.add_days(30),
                cancel_at_period_end: false,
                trial_end: None,
                plan: None,
                interval: Some("month".to_string()),
                requires_action: false,
                failure: None,
            },
        }
    }

    pub fn subscription_id(mut self, id: impl Into<String>) -> Self {
        self.notification.subscription_id = id.into();
        self
    }

    pub fn period_end(mut self, end: Timestamp) -> Self {
        self.notification.current_period_end = end;
        self
    }

    pub fn cancel_at_period_end(mut self, cancel: bool) -> Self {
        self.notification.cancel_at_period_end = cancel;
        self
    }

    pub fn trial_end(mut self, end: Timestamp) -> Self {
        self.notification.trial_end = Some(end);
        self
    }

    pub fn plan(mut self, plan: impl Into<String>) -> Self {
        self.notification.plan = Some(plan.into());
        self
    }

    pub fn interval(mut self, interval: impl Into<String>) -> Self {
        self.notification.interval = Some(interval.into());
        self
    }

    pub fn requires_action(mut self, requires: bool) -> Self {
        self.notification.requires_action = requires;
        self
    }

    pub fn failure(mut self, reason: &str, amount_due: i64, invoice_id: &str) -> Self {
        self.notification.failure = Some(FailureDetail {
            reason: reason.to_string(),
            amount_due,
            invoice_id: invoice_id.to_string(),
        });
        self
    }

    pub fn build(self) -> BillingNotification {
        self.notification
    }
}
