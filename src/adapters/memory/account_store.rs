//! In-memory account store adapter.
//!
//! Backs the `AccountStore` port with a `HashMap` behind an async
//! read-write lock. Compare-and-swap checks the stored version under the
//! write lock, which is what serializes concurrent reconciliations for
//! the same account.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entitlement::{Account, SubscriptionStatus};
use crate::domain::foundation::{AccountId, Timestamp};
use crate::ports::{AccountStore, SaveOutcome, StorageError};

/// In-memory storage for accounts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Clears all stored data (useful for tests).
    pub async fn clear(&self) {
        self.accounts.write().await.clear();
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, StorageError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn insert(&self, account: Account) -> Result<(), StorageError> {
        self.accounts.write().await.insert(account.id, account);
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        expected_version: u64,
        mut account: Account,
    ) -> Result<SaveOutcome, StorageError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get(&account.id) {
            Some(stored) if stored.version != expected_version => Ok(SaveOutcome::Conflict),
            Some(_) => {
                account.version = expected_version + 1;
                accounts.insert(account.id, account);
                Ok(SaveOutcome::Updated)
            }
            None => Err(StorageError::Unavailable(format!(
                "account {} does not exist",
                account.id
            ))),
        }
    }

    async fn list_beta_expiring_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Account>, StorageError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .filter(|account| {
                account.subscription_status == SubscriptionStatus::BetaAccess
                    && account
                        .beta_expires_at
                        .map(|expiry| expiry >= from && expiry < to)
                        .unwrap_or(false)
            })
            .cloned()
            .collect())
    }
}
