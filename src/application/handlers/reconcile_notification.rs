//! ReconcileNotificationHandler - applies a billing processor notification.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::billing::{BillingNotification, ConflictError, ReconciliationReducer};
use crate::domain::entitlement::{EntitlementError, SubscriptionStatus};
use crate::domain::foundation::{AccountId, Clock};
use crate::ports::{AccountStore, NotificationDispatcher, SaveOutcome};

/// Command carrying a parsed processor notification.
#[derive(Debug, Clone)]
pub struct ReconcileNotificationCommand {
    pub account_id: AccountId,
    pub notification: BillingNotification,
}

/// Result of reconciling a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Account state was updated to match the notification.
    Applied { status: SubscriptionStatus },
    /// The notification described an older period than the one on
    /// record; nothing was changed.
    Stale,
}

/// Handler that reconciles processor notifications into account state.
///
/// Loads the account, runs the pure reducer, and persists through
/// compare-and-swap with a bounded retry loop. Emitted notification
/// commands are dispatched after the write commits; a dispatch failure
/// is logged and swallowed, never rolled back.
pub struct ReconcileNotificationHandler {
    store: Arc<dyn AccountStore>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    clock: Arc<dyn Clock>,
    max_retries: u32,
}

impl ReconcileNotificationHandler {
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
        cmd: ReconcileNotificationCommand,
    ) -> Result<ReconcileOutcome, EntitlementError> {
        for attempt in 1..=self.max_retries.max(1) {
            let account = self
                .store
                .get(&cmd.account_id)
                .await
                .map_err(|e| EntitlementError::storage(e.to_string()))?
                .ok_or(EntitlementError::AccountNotFound(cmd.account_id))?;

            let now = self.clock.now();
            let (next, commands) =
                match ReconciliationReducer::reconcile(&account, &cmd.notification, now) {
                    Ok(result) => result,
                    Err(e) if e.is_stale() => {
                        info!(
                            account_id = %cmd.account_id,
                            subscription_id = %cmd.notification.subscription_id,
                            "Stale billing notification ignored"
                        );
                        return Ok(ReconcileOutcome::Stale);
                    }
                    Err(e) => return Err(e.into()),
                };

            match self
                .store
                .compare_and_swap(account.version, next)
                .await
                .map_err(|e| EntitlementError::storage(e.to_string()))?
            {
                SaveOutcome::Updated => {
                    let status = cmd.notification.status;
                    for command in &commands {
                        if let Err(e) = self.dispatcher.send(command).await {
                            warn!(
                                account_id = %command.account_id,
                                kind = ?command.kind,
                                error = %e,
                                "Notification dispatch failed; state change kept"
                            );
                        }
                    }
                    return Ok(ReconcileOutcome::Applied { status });
                }
                SaveOutcome::Conflict => {
                    debug!(
                        account_id = %cmd.account_id,
                        attempt,
                        "Concurrent update detected, retrying reconciliation"
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
    use crate::domain::billing::{BillingNotificationBuilder, NotificationKind};
    use crate::domain::entitlement::Account;
    use crate::domain::foundation::{FixedClock, Timestamp};

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_760_000_000).unwrap()
    }

    async fn seeded_account(store: &InMemoryAccountStore) -> Account {
        let account = Account::new(AccountId::new(), "writer@example.com", now());
        store.insert(account.clone()).await.unwrap();
        account
    }

    fn handler(
        store: Arc<InMemoryAccountStore>,
        dispatcher: Arc<RecordingDispatcher>,
    ) -> ReconcileNotificationHandler {
        ReconcileNotificationHandler::new(store, dispatcher, Arc::new(FixedClock::at(now())), 3)
    }

    #[tokio::test]
    async fn active_notification_updates_account_and_confirms() {
        let store = Arc::new(InMemoryAccountStore::new());
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let account = seeded_account(&store).await;

        let notification =
            BillingNotificationBuilder::new(SubscriptionStatus::Active, now()).build();

        let outcome = handler(store.clone(), dispatcher.clone())
            .handle(ReconcileNotificationCommand {
                account_id: account.id,
                notification,
            })
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ReconcileOutcome::Applied {
                status: SubscriptionStatus::Active
            }
        );

        let stored = store.get(&account.id).await.unwrap().unwrap();
        assert_eq!(stored.subscription_status, SubscriptionStatus::Active);
        assert_eq!(stored.version, account.version + 1);

        let sent = dispatcher.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::SubscriptionConfirmed);
    }

    #[tokio::test]
    async fn stale_notification_is_ignored_without_write() {
        let store = Arc::new(InMemoryAccountStore::new());
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let account = seeded_account(&store).await;

        let current =
            BillingNotificationBuilder::new(SubscriptionStatus::Active, now()).build();
        let h = handler(store.clone(), dispatcher.clone());
        h.handle(ReconcileNotificationCommand {
            account_id: account.id,
            notification: current,
        })
        .await
        .unwrap();

        let before = store.get(&account.id).await.unwrap().unwrap();

        let stale =
            BillingNotificationBuilder::new(SubscriptionStatus::Canceled, now().minus_days(40))
                .build();
        let outcome = h
            .handle(ReconcileNotificationCommand {
                account_id: account.id,
                notification: stale,
            })
            .await
            .unwrap();

        assert_eq!(outcome, ReconcileOutcome::Stale);

        let after = store.get(&account.id).await.unwrap().unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn dispatch_failure_keeps_the_state_change() {
        let store = Arc::new(InMemoryAccountStore::new());
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let account = seeded_account(&store).await;
        dispatcher.fail_for(account.id).await;

        let notification =
            BillingNotificationBuilder::new(SubscriptionStatus::Active, now()).build();

        let outcome = handler(store.clone(), dispatcher.clone())
            .handle(ReconcileNotificationCommand {
                account_id: account.id,
                notification,
            })
            .await
            .unwrap();

        assert!(matches!(outcome, ReconcileOutcome::Applied { .. }));
        let stored = store.get(&account.id).await.unwrap().unwrap();
        assert_eq!(stored.subscription_status, SubscriptionStatus::Active);
        assert!(dispatcher.sent().await.is_empty());
    }

    #[tokio::test]
    async fn missing_account_is_reported() {
        let store = Arc::new(InMemoryAccountStore::new());
        let dispatcher = Arc::new(RecordingDispatcher::new());

        let missing = AccountId::new();
        let notification =
            BillingNotificationBuilder::new(SubscriptionStatus::Active, now()).build();

        let result = handler(store, dispatcher)
            .handle(ReconcileNotificationCommand {
                account_id: missing,
                notification,
            })
            .await;

        assert_eq!(result, Err(EntitlementError::AccountNotFound(missing)));
    }

    #[tokio::test]
    async fn replayed_notification_is_idempotent() {
        let store = Arc::new(InMemoryAccountStore::new());
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let account = seeded_account(&store).await;

        let notification =
            BillingNotificationBuilder::new(SubscriptionStatus::Active, now()).build();
        let h = handler(store.clone(), dispatcher.clone());
        let cmd = ReconcileNotificationCommand {
            account_id: account.id,
            notification,
        };

        h.handle(cmd.clone()).await.unwrap();
        let first = store.get(&account.id).await.unwrap().unwrap();

        h.handle(cmd).await.unwrap();
        let second = store.get(&account.id).await.unwrap().unwrap();

        assert_eq!(second.subscription_history, first.subscription_history);
        assert_eq!(second.subscription_status, first.subscription_status);
        assert_eq!(second.current_period_end, first.current_period_end);
    }
}
