//! Account persistence port.
//!
//! Reconciliation and dunning updates are read-modify-write operations
//! against a single account record. Concurrent updates for the same
//! account must not interleave, so writes go through a version-checked
//! compare-and-swap; callers retry with freshly read state on conflict.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entitlement::Account;
use crate::domain::foundation::{AccountId, Timestamp};

/// Storage collaborator failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a compare-and-swap write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The record was written; its version advanced by one.
    Updated,
    /// Another writer got there first; re-read and retry.
    Conflict,
}

/// Key-value account storage with optimistic concurrency.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fetches an account snapshot by id.
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, StorageError>;

    /// Inserts a brand-new account record.
    async fn insert(&self, account: Account) -> Result<(), StorageError>;

    /// Writes `account` only if the stored version still equals
    /// `expected_version`; on success the stored version advances.
    async fn compare_and_swap(
        &self,
        expected_version: u64,
        account: Account,
    ) -> Result<SaveOutcome, StorageError>;

    /// Beta accounts whose `beta_expires_at` falls in `[from, to)`.
    /// Consumed by the daily expiry reminder job.
    async fn list_beta_expiring_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Account>, StorageError>;
}
