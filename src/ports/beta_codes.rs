//! Beta redemption code lookup port.
//!
//! Codes are owned by a configuration collaborator and injected here,
//! rather than living as a table inside the evaluator.

use async_trait::async_trait;

use crate::domain::foundation::Timestamp;

use super::StorageError;

/// A redeemable beta grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetaGrant {
    pub code: String,
    /// When access granted by this code ends.
    pub expires_at: Timestamp,
}

/// Maps redemption codes to beta grants.
#[async_trait]
pub trait BetaCodeDirectory: Send + Sync {
    /// Returns the grant for `code`, or `None` if the code is unknown.
    async fn lookup(&self, code: &str) -> Result<Option<BetaGrant>, StorageError>;
}
