//! RecordPaymentFailureHandler - books a payment failure and schedules the retry.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::billing::{
    ConflictError, DunningTracker, FailureDetail, NotificationCommand,
};
use crate::domain::entitlement::EntitlementError;
use crate::domain::foundation::{AccountId, Clock, Timestamp};
use crate::ports::{AccountStore, NotificationDispatcher, SaveOutcome};

/// Command describing one failed payment attempt.
#[derive(Debug, Clone)]
pub struct RecordPaymentFailureCommand {
    pub account_id: AccountId,
    pub failure: FailureDetail,
}

/// Dunning state after booking the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPaymentFailureResult {
    pub retry_count: u32,
    pub next_retry_at: Timestamp,
}

/// Handler that records payment failures through the dunning tracker.
///
/// The failure append, counter bump, and retry schedule land in one
/// compare-and-swap write. A payment-failed notification goes out after
/// the write commits.
pub struct RecordPaymentFailureHandler {
    store: Arc<dyn AccountStore>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    clock: Arc<dyn Clock>,
    max_retries: u32,
}

impl RecordPaymentFailureHandler {
    pub fn new(
        store: Arc<dyn AccountStore>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        clock: Arc<dyn Clock>,
        max_retries: u32,
    ) -> Self {
        Self {
            store,
            dispatcher,
            clock,
            max_retries,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordPaymentFailureCommand,
    ) -> Result<RecordPaymentFailureResult, EntitlementError> {
        for attempt in 1..=self.max_retries.max(1) {
            let account = self
                .store
                .get(&cmd.account_id)
                .await
                .map_err(|e| EntitlementError::storage(e.to_string()))?
                .ok_or(EntitlementError::AccountNotFound(cmd.account_id))?;

            let expected_version = account.version;
            let now = self.clock.now();
            let next = DunningTracker::record_failure(account, &cmd.failure, now);
            let result = RecordPaymentFailureResult {
                retry_count: next.payment_retry_count,
                next_retry_at: now
                    .add_days(DunningTracker::retry_delay_days(next.payment_retry_count)),
            };
            let notify = NotificationCommand::payment_failed(&next, &cmd.failure);

            match self
                .store
                .compare_and_swap(expected_version, next)
                .await
                .map_err(|e| EntitlementError::storage(e.to_string()))?
            {
                SaveOutcome::Updated => {
                    if let Err(e) = self.dispatcher.send(&notify).await {
                        warn!(
                            account_id = %cmd.account_id,
                            error = %e,
                            "Payment-failed notification dispatch failed; dunning state kept"
                        );
                    }
                    return Ok(result);
                }
                SaveOutcome::Conflict => {
                    debug!(
                        account_id = %cmd.account_id,
                        attempt,
                        "Concurrent update detected, retrying failure recording"
                    );
                }
            }
        }

        Err(ConflictError {
            account_id: cmd.account_id,
            attempts: self.max_retries.max(1),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAccountStore, RecordingDispatcher};
    use crate::domain::billing::NotificationKind;
    use crate::domain::entitlement::Account;
    use crate::domain::foundation::FixedClock;

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_760_000_000).unwrap()
    }

    fn failure() -> FailureDetail {
        FailureDetail {
            reason: "card_declined".to_string(),
            amount_due: 1_500,
            invoice_id: "in_test_1".to_string(),
        }
    }

    fn handler(
        store: Arc<InMemoryAccountStore>,
        dispatcher: Arc<RecordingDispatcher>,
    ) -> RecordPaymentFailureHandler {
        RecordPaymentFailureHandler::new(store, dispatcher, Arc::new(FixedClock::at(now())), 3)
    }

    #[tokio::test]
    async fn first_failure_schedules_retry_one_day_out() {
        let store = Arc::new(InMemoryAccountStore::new());
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let account = Account::new(AccountId::new(), "writer@example.com", now());
        store.insert(account.clone()).await.unwrap();

        let result = handler(store.clone(), dispatcher.clone())
            .handle(RecordPaymentFailureCommand {
                account_id: account.id,
                failure: failure(),
            })
            .await
            .unwrap();

        assert_eq!(result.retry_count, 1);
        assert_eq!(result.next_retry_at, now().add_days(1));

        let stored = store.get(&account.id).await.unwrap().unwrap();
        assert_eq!(stored.payment_failures.len(), 1);
        assert_eq!(stored.last_payment_failure_date, Some(now()));
        assert!(stored.dunning_invariant_holds());

        let sent = dispatcher.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::PaymentFailed);
    }

    #[tokio::test]
    async fn backoff_caps_at_seven_days() {
        let store = Arc::new(InMemoryAccountStore::new());
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let account = Account::new(AccountId::new(), "writer@example.com", now());
        store.insert(account.clone()).await.unwrap();

        let h = handler(store.clone(), dispatcher);
        let mut last = None;
        for _ in 0..6 {
            last = Some(
                h.handle(RecordPaymentFailureCommand {
                    account_id: account.id,
                    failure: failure(),
                })
                .await
                .unwrap(),
            );
        }

        let last = last.unwrap();
        assert_eq!(last.retry_count, 6);
        assert_eq!(last.next_retry_at, now().add_days(7));
    }

    #[tokio::test]
    async fn missing_account_is_reported() {
        let store = Arc::new(InMemoryAccountStore::new());
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let missing = AccountId::new();

        let result = handler(store, dispatcher)
            .handle(RecordPaymentFailureCommand {
                account_id: missing,
                failure: failure(),
            })
            .await;

        assert_eq!(result, Err(EntitlementError::AccountNotFound(missing)));
    }
}
