//! Billing domain module.
//!
//! Folds processor notifications into account state and tracks the
//! payment-failure retry schedule.
//!
//! # Module Structure
//!
//! - `notification` - inbound billing notification shape and parsing
//! - `reducer` - ReconciliationReducer folding notifications into accounts
//! - `dunning` - DunningTracker bounded-backoff failure recording
//! - `commands` - outbound notification commands emitted by the reducer
//! - `errors` - reconciliation and conflict error types

mod commands;
mod dunning;
mod errors;
mod notification;
mod reducer;

pub use commands::{NotificationCommand, NotificationKind};
pub use dunning::DunningTracker;
pub use errors::{ConflictError, ReconciliationError};
pub use notification::{BillingNotification, FailureDetail};
pub use reducer::ReconciliationReducer;

#[cfg(test)]
pub use notification::BillingNotificationBuilder;
