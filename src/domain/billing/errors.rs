//! Reconciliation and concurrency error types.

use thiserror::Error;

use crate::domain::foundation::{AccountId, Timestamp};

/// A billing notification that cannot be applied.
///
/// `MissingField` and `InvalidStatus` are malformed input and should be
/// surfaced for alerting; `Stale` is an informational no-op (the processor
/// delivers at-least-once and possibly out of order).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationError {
    #[error("Notification missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Notification carries unrecognized status '{0}'")]
    InvalidStatus(String),

    #[error("Stale notification: period start {received:?} predates recorded {current:?}")]
    Stale {
        received: Timestamp,
        current: Timestamp,
    },
}

impl ReconciliationError {
    /// True for out-of-order/duplicate deliveries that are safe to drop.
    pub fn is_stale(&self) -> bool {
        matches!(self, ReconciliationError::Stale { .. })
    }
}

/// Concurrent-update retries exhausted for one account.
///
/// Never silently dropped; the caller decides whether to re-enqueue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Update for account {account_id} conflicted after {attempts} attempts")]
pub struct ConflictError {
    pub account_id: AccountId,
    pub attempts: u32,
}
