//! Entitlement-specific error types.
//!
//! Umbrella error returned by the application handlers.
//!
//! # Taxonomy
//!
//! | Error | Meaning |
//! |-------|---------|
//! | AccountNotFound | no account record for the identifier |
//! | UnknownBetaCode | redemption code not in the directory |
//! | InvalidState | operation not allowed from the current status |
//! | Reconciliation | malformed or stale billing notification |
//! | Conflict | concurrent-update retries exhausted |
//! | Storage | storage collaborator failure |

use thiserror::Error;

use crate::domain::billing::{ConflictError, ReconciliationError};
use crate::domain::foundation::AccountId;

/// Errors surfaced by entitlement operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntitlementError {
    #[error("No account found for id {0}")]
    AccountNotFound(AccountId),

    #[error("Unknown beta code '{0}'")]
    UnknownBetaCode(String),

    #[error("Invalid state: cannot {attempted} while {current}")]
    InvalidState { current: String, attempted: String },

    #[error(transparent)]
    Reconciliation(#[from] ReconciliationError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl EntitlementError {
    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        EntitlementError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        EntitlementError::Storage(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_not_found_displays_id() {
        let id = AccountId::new();
        let err = EntitlementError::AccountNotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn invalid_state_displays_both_parts() {
        let err = EntitlementError::invalid_state("active", "redeem a beta code");
        assert_eq!(
            err.to_string(),
            "Invalid state: cannot redeem a beta code while active"
        );
    }
}
