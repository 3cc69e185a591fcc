//! Dunning tracker - payment-failure history and retry scheduling.
//!
//! Records each payment failure and computes the next retry instant with
//! bounded exponential backoff: 1, 2, 4 days, then capped at 7 days for
//! every further retry. Recording never triggers a retry itself; it only
//! stores schedule intent for the external dunning job to read.

use crate::domain::entitlement::{Account, PaymentFailure};
use crate::domain::foundation::Timestamp;

use super::FailureDetail;

/// Backoff cap in days.
const RETRY_CAP_DAYS: i64 = 7;

/// Pure recorder for payment failures.
pub struct DunningTracker;

impl DunningTracker {
    /// Records one payment failure on the account, returning the updated
    /// value. Always succeeds given a well-formed failure record; the
    /// append, counter bump, and schedule update happen as one step.
    pub fn record_failure(
        mut account: Account,
        failure: &FailureDetail,
        now: Timestamp,
    ) -> Account {
        account.push_payment_failure(PaymentFailure {
            date: now,
            reason: failure.reason.clone(),
            amount_due: failure.amount_due,
            invoice_id: failure.invoice_id.clone(),
        });
        account.payment_retry_count += 1;
        account.last_payment_failure_date = Some(now);
        account.next_payment_retry_date =
            Some(now.add_days(Self::retry_delay_days(account.payment_retry_count)));
        account.touch(now);
        account
    }

    /// Days until the next retry after the given (post-increment) failure
    /// count: `min(2^(count-1), 7)`.
    pub fn retry_delay_days(retry_count: u32) -> i64 {
        match retry_count {
            0 | 1 => 1,
            2 => 2,
            3 => 4,
            _ => RETRY_CAP_DAYS,
        }
    }
}
