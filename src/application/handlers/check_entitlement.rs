//! CheckEntitlementHandler - the access-check query.

use std::sync::Arc;

use crate::domain::entitlement::{
    EntitlementError, EntitlementPolicy, StatusMessage, SubscriptionStatus,
};
use crate::domain::foundation::{AccountId, Clock};
use crate::ports::AccountStore;

/// Query for one account's current access.
#[derive(Debug, Clone, Copy)]
pub struct CheckEntitlementQuery {
    pub account_id: AccountId,
}

/// Access decision plus the user-facing status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckEntitlementResult {
    pub has_access: bool,
    pub status: SubscriptionStatus,
    pub message: StatusMessage,
}

/// Read-only handler evaluating an account against the grace policy.
pub struct CheckEntitlementHandler {
    store: Arc<dyn AccountStore>,
    policy: EntitlementPolicy,
    clock: Arc<dyn Clock>,
}

impl CheckEntitlementHandler {
    pub fn new(
        store: Arc<dyn AccountStore>,
        policy: EntitlementPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            policy,
            clock,
        }
    }

    pub async fn handle(
        &self,
        query: CheckEntitlementQuery,
    ) -> Result<CheckEntitlementResult, EntitlementError> {
        let account = self
            .store
            .get(&query.account_id)
            .await
            .map_err(|e| EntitlementError::storage(e.to_string()))?
            .ok_or(EntitlementError::AccountNotFound(query.account_id))?;

        let now = self.clock.now();
        Ok(CheckEntitlementResult {
            has_access: self.policy.has_access(&account, now),
            status: account.subscription_status,
            message: self.policy.status_message(&account, now),
        })
    }
}
