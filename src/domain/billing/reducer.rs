//! Reconciliation reducer - folds processor notifications into accounts.
//!
//! The processor is the source of truth for subscription fields, so the
//! reducer overwrites them last-writer-wins by notification receipt order,
//! with one defense: a notification whose period start predates the
//! recorded period start is stale and rejected without mutation.
//!
//! Applying the same notification twice produces the same account state;
//! the processor delivers at-least-once and redelivery must be safe.

use crate::domain::entitlement::{Account, SubscriptionPeriod, SubscriptionStatus};
use crate::domain::foundation::Timestamp;

use super::{BillingNotification, NotificationCommand, ReconciliationError};

/// Folds one billing notification into local account state.
pub struct ReconciliationReducer;

impl ReconciliationReducer {
    /// Produces the account state after the notification, plus zero or one
    /// outbound command. Pure; persistence and dispatch are the caller's
    /// responsibility and must not be transactional together.
    pub fn reconcile(
        account: &Account,
        notification: &BillingNotification,
        now: Timestamp,
    ) -> Result<(Account, Vec<NotificationCommand>), ReconciliationError> {
        if let Some(current) = account.current_period_start {
            if notification.current_period_start.is_before(&current) {
                return Err(ReconciliationError::Stale {
                    received: notification.current_period_start,
                    current,
                });
            }
        }

        let previous_status = account.subscription_status;
        let mut next = account.clone();

        // Processor-owned fields: overwrite unconditionally.
        next.external_subscription_id = Some(notification.subscription_id.clone());
        next.external_price_id = Some(notification.price_id.clone());
        next.current_period_start = Some(notification.current_period_start);
        next.current_period_end = Some(notification.current_period_end);
        next.subscription_status = notification.status;

        if let Some(plan) = notification.effective_plan() {
            next.subscription_plan = Some(plan);
        }
        if let Some(trial_end) = notification.trial_end {
            next.trial_ends_at = Some(trial_end);
        }

        Self::record_period(&mut next, notification);

        if notification.status == SubscriptionStatus::Active {
            next.reset_dunning();
        }

        next.touch(now);

        let commands = Self::emit_command(&next, previous_status, notification);
        Ok((next, commands))
    }

    /// Appends this period to the audit trail, or patches the latest entry
    /// for the cancellation-marking case. Re-applying an identical
    /// notification leaves the history unchanged.
    fn record_period(account: &mut Account, notification: &BillingNotification) {
        let entry = SubscriptionPeriod {
            status: notification.status,
            price_id: Some(notification.price_id.clone()),
            start_date: notification.current_period_start,
            end_date: notification.current_period_end,
            cancel_at_period_end: notification.cancel_at_period_end,
        };

        match account.latest_period() {
            Some(latest) if *latest == entry => {
                // Identical redelivery; nothing to record.
            }
            Some(latest)
                if notification.status == SubscriptionStatus::Canceled
                    && latest.same_period(entry.start_date, entry.end_date) =>
            {
                account.mark_latest_period_canceled(notification.cancel_at_period_end);
            }
            _ => account.push_period(entry),
        }
    }

    fn emit_command(
        account: &Account,
        previous_status: SubscriptionStatus,
        notification: &BillingNotification,
    ) -> Vec<NotificationCommand> {
        if notification.requires_action {
            return vec![NotificationCommand::action_required(account)];
        }
        match notification.status {
            SubscriptionStatus::Active if previous_status == SubscriptionStatus::Active => {
                vec![NotificationCommand::renewal(account)]
            }
            SubscriptionStatus::Active => {
                vec![NotificationCommand::subscription_confirmed(account)]
            }
            SubscriptionStatus::PastDue | SubscriptionStatus::Unpaid => notification
                .failure
                .as_ref()
                .map(|failure| vec![NotificationCommand::payment_failed(account, failure)])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}
