//! Account aggregate entity.
//!
//! Holds the subscription fields that drive entitlement decisions. All
//! mutating operations return through pure methods; persistence is a
//! separate step performed by the application layer against the
//! `AccountStore` port.
//!
//! # Invariants
//!
//! - `payment_retry_count == 0` whenever `last_payment_failure_date` is unset
//! - `next_payment_retry_date`, when present, is after `last_payment_failure_date`
//! - `beta_expires_at` is never cleared once set, even after the account
//!   transitions away from beta (audit history)
//! - `subscription_history` never shrinks; the only in-place mutation is
//!   marking the most recent open entry canceled

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, StateMachine, Timestamp, ValidationError};

use super::{SubscriptionPlan, SubscriptionStatus};

/// One billing period snapshot in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPeriod {
    pub status: SubscriptionStatus,
    pub price_id: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub cancel_at_period_end: bool,
}

impl SubscriptionPeriod {
    /// Two history entries describe the same period when their boundaries match.
    pub fn same_period(&self, start: Timestamp, end: Timestamp) -> bool {
        self.start_date == start && self.end_date == end
    }
}

/// One recorded payment failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFailure {
    pub date: Timestamp,
    pub reason: String,
    /// Amount due in cents.
    pub amount_due: i64,
    pub invoice_id: String,
}

/// Account aggregate - one per user of the product.
///
/// Created with status `None`; transitions via beta-code redemption,
/// reconciliation of processor notifications, and dunning appends.
/// Accounts are never deleted; cancellation is a status value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for this account.
    pub id: AccountId,

    /// Email used for outbound notification commands.
    pub email: String,

    /// Primary state-machine variable for entitlement.
    pub subscription_status: SubscriptionStatus,

    /// End of the beta window; meaningful only under `BetaAccess`, but
    /// preserved forever once set.
    pub beta_expires_at: Option<Timestamp>,

    /// Start of the paid period most recently reported by the processor.
    /// Used to reject stale, out-of-order notifications.
    pub current_period_start: Option<Timestamp>,

    /// End of the paid period reported by the processor; drives grace
    /// logic for `PastDue`/`Canceled` and "renews in N days" messaging.
    pub current_period_end: Option<Timestamp>,

    /// Trial end reported by the processor, if any.
    pub trial_ends_at: Option<Timestamp>,

    /// Processor subscription object correlating this account.
    pub external_subscription_id: Option<String>,

    /// Processor price correlating this account.
    pub external_price_id: Option<String>,

    /// Billing cadence derived during reconciliation.
    pub subscription_plan: Option<SubscriptionPlan>,

    /// Append-only audit trail of billing periods.
    pub subscription_history: Vec<SubscriptionPeriod>,

    /// Append-only record of payment failures.
    pub payment_failures: Vec<PaymentFailure>,

    /// Number of consecutive failed payment attempts; reset to 0 exactly
    /// when a reconciliation reports `Active`.
    pub payment_retry_count: u32,

    pub last_payment_failure_date: Option<Timestamp>,
    pub next_payment_retry_date: Option<Timestamp>,
    pub payment_reminder_sent_date: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Optimistic-concurrency token consumed by the storage port's
    /// compare-and-swap.
    pub version: u64,
}

impl Account {
    /// Creates a fresh account with no subscription.
    pub fn new(id: AccountId, email: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id,
            email: email.into(),
            subscription_status: SubscriptionStatus::None,
            beta_expires_at: None,
            current_period_start: None,
            current_period_end: None,
            trial_ends_at: None,
            external_subscription_id: None,
            external_price_id: None,
            subscription_plan: None,
            subscription_history: Vec::new(),
            payment_failures: Vec::new(),
            payment_retry_count: 0,
            last_payment_failure_date: None,
            next_payment_retry_date: None,
            payment_reminder_sent_date: None,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Grants beta access until `expires_at`.
    ///
    /// # Errors
    ///
    /// Returns error if the account already holds a processor-managed
    /// subscription (beta never downgrades a paying account).
    pub fn redeem_beta(
        &mut self,
        expires_at: Timestamp,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        self.subscription_status = self
            .subscription_status
            .transition_to(SubscriptionStatus::BetaAccess)?;
        self.beta_expires_at = Some(expires_at);
        self.updated_at = now;
        Ok(())
    }

    /// The most recent history entry, if any.
    pub fn latest_period(&self) -> Option<&SubscriptionPeriod> {
        self.subscription_history.last()
    }

    /// Appends a history entry. History is append-only; callers must not
    /// rewrite prior entries through any other path.
    pub fn push_period(&mut self, period: SubscriptionPeriod) {
        self.subscription_history.push(period);
    }

    /// Marks the most recent history entry canceled in place.
    ///
    /// This is the single permitted mutation of an existing entry.
    pub fn mark_latest_period_canceled(&mut self, cancel_at_period_end: bool) {
        if let Some(latest) = self.subscription_history.last_mut() {
            latest.status = SubscriptionStatus::Canceled;
            latest.cancel_at_period_end = cancel_at_period_end;
        }
    }

    /// Appends a payment failure record.
    pub fn push_payment_failure(&mut self, failure: PaymentFailure) {
        self.payment_failures.push(failure);
    }

    /// Clears all dunning state in one step.
    ///
    /// Called exactly when a reconciliation reports `Active`. Partial
    /// reset is an invariant violation, so the four fields change together.
    pub fn reset_dunning(&mut self) {
        self.payment_retry_count = 0;
        self.last_payment_failure_date = None;
        self.next_payment_retry_date = None;
        self.payment_reminder_sent_date = None;
    }

    /// Returns true when the dunning invariant holds: a zero retry count
    /// goes together with cleared failure timestamps, and the next retry
    /// is always scheduled after the last failure.
    pub fn dunning_invariant_holds(&self) -> bool {
        if self.last_payment_failure_date.is_none() && self.payment_retry_count != 0 {
            return false;
        }
        match (self.last_payment_failure_date, self.next_payment_retry_date) {
            (Some(last), Some(next)) => next.is_after(&last),
            (None, Some(_)) => false,
            _ => true,
        }
    }

    /// Records the update instant.
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }
}
