//! RedeemBetaCodeHandler - grants beta access from a redemption code.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::billing::ConflictError;
use crate::domain::entitlement::EntitlementError;
use crate::domain::foundation::{AccountId, Clock, Timestamp};
use crate::ports::{AccountStore, BetaCodeDirectory, SaveOutcome};

/// Command to redeem a beta code for an account.
#[derive(Debug, Clone)]
pub struct RedeemBetaCodeCommand {
    pub account_id: AccountId,
    pub code: String,
}

/// Outcome of a successful redemption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemBetaCodeResult {
    pub expires_at: Timestamp,
}

/// Handler that looks up a beta code and moves the account into beta.
///
/// Redemption never downgrades an account that already holds a
/// processor-managed subscription; the state machine rejects those
/// transitions.
pub struct RedeemBetaCodeHandler {
    store: Arc<dyn AccountStore>,
    codes: Arc<dyn BetaCodeDirectory>,
    clock: Arc<dyn Clock>,
    max_retries: u32,
}

impl RedeemBetaCodeHandler {
    pub fn new(
        store: Arc<dyn AccountStore>,
        codes: Arc<dyn BetaCodeDirectory>,
        clock: Arc<dyn Clock>,
        max_retries: u32,
    ) -> Self {
        Self {
            store,
            codes,
            clock,
            max_retries,
        }
    }

    pub async fn handle(
        &self,
        cmd: RedeemBetaCodeCommand,
    ) -> Result<RedeemBetaCodeResult, EntitlementError> {
        let grant = self
            .codes
            .lookup(&cmd.code)
            .await
            .map_err(|e| EntitlementError::storage(e.to_string()))?
            .ok_or_else(|| EntitlementError::UnknownBetaCode(cmd.code.clone()))?;

        for attempt in 1..=self.max_retries.max(1) {
            let mut account = self
                .store
                .get(&cmd.account_id)
                .await
                .map_err(|e| EntitlementError::storage(e.to_string()))?
                .ok_or(EntitlementError::AccountNotFound(cmd.account_id))?;

            let expected_version = account.version;
            let now = self.clock.now();
            account.redeem_beta(grant.expires_at, now).map_err(|_| {
                EntitlementError::invalid_state(
                    account.subscription_status.as_str(),
                    "redeem a beta code",
                )
            })?;

            match self
                .store
                .compare_and_swap(expected_version, account)
                .await
                .map_err(|e| EntitlementError::storage(e.to_string()))?
            {
                SaveOutcome::Updated => {
                    info!(
                        account_id = %cmd.account_id,
                        expires_at = %grant.expires_at,
                        "Beta code redeemed"
                    );
                    return Ok(RedeemBetaCodeResult {
                        expires_at: grant.expires_at,
                    });
                }
                SaveOutcome::Conflict => {
                    debug!(
                        account_id = %cmd.account_id,
                        attempt,
                        "Concurrent update detected, retrying redemption"
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
    use crate::adapters::memory::{InMemoryAccountStore, StaticBetaCodeDirectory};
    use crate::domain::entitlement::{Account, SubscriptionStatus};
    use crate::domain::foundation::FixedClock;

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_760_000_000).unwrap()
    }

    fn directory() -> Arc<StaticBetaCodeDirectory> {
        Arc::new(StaticBetaCodeDirectory::from_pairs([(
            "EARLYBIRD".to_string(),
            now().add_days(90),
        )]))
    }

    fn handler(
        store: Arc<InMemoryAccountStore>,
        codes: Arc<StaticBetaCodeDirectory>,
    ) -> RedeemBetaCodeHandler {
        RedeemBetaCodeHandler::new(store, codes, Arc::new(FixedClock::at(now())), 3)
    }

    #[tokio::test]
    async fn known_code_grants_beta_access() {
        let store = Arc::new(InMemoryAccountStore::new());
        let account = Account::new(AccountId::new(), "writer@example.com", now());
        store.insert(account.clone()).await.unwrap();

        let result = handler(store.clone(), directory())
            .handle(RedeemBetaCodeCommand {
                account_id: account.id,
                code: "EARLYBIRD".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.expires_at, now().add_days(90));

        let stored = store.get(&account.id).await.unwrap().unwrap();
        assert_eq!(stored.subscription_status, SubscriptionStatus::BetaAccess);
        assert_eq!(stored.beta_expires_at, Some(now().add_days(90)));
    }

    #[tokio::test]
    async fn unknown_code_is_rejected() {
        let store = Arc::new(InMemoryAccountStore::new());
        let account = Account::new(AccountId::new(), "writer@example.com", now());
        store.insert(account.clone()).await.unwrap();

        let result = handler(store, directory())
            .handle(RedeemBetaCodeCommand {
                account_id: account.id,
                code: "NOPE".to_string(),
            })
            .await;

        assert_eq!(
            result,
            Err(EntitlementError::UnknownBetaCode("NOPE".to_string()))
        );
    }

    #[tokio::test]
    async fn paying_account_cannot_redeem() {
        let store = Arc::new(InMemoryAccountStore::new());
        let mut account = Account::new(AccountId::new(), "writer@example.com", now());
        account.subscription_status = SubscriptionStatus::Active;
        store.insert(account.clone()).await.unwrap();

        let result = handler(store.clone(), directory())
            .handle(RedeemBetaCodeCommand {
                account_id: account.id,
                code: "EARLYBIRD".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(EntitlementError::InvalidState { .. })
        ));

        let stored = store.get(&account.id).await.unwrap().unwrap();
        assert_eq!(stored.subscription_status, SubscriptionStatus::Active);
    }
}
