//! Entitlement domain module.
//!
//! Decides whether an account may currently use the gated product and
//! with what user-facing status.
//!
//! # Module Structure
//!
//! - `account` - Account aggregate entity
//! - `status` - SubscriptionStatus state machine
//! - `plan` - SubscriptionPlan billing cadence
//! - `grace` - shared grace period policy
//! - `evaluator` - access decision table and status messaging
//! - `errors` - entitlement error types

mod account;
mod errors;
mod evaluator;
mod grace;
mod plan;
mod status;

pub use account::{Account, PaymentFailure, SubscriptionPeriod};
pub use errors::EntitlementError;
pub use evaluator::{EntitlementPolicy, Severity, StatusMessage};
pub use grace::{days_until, grace_window, GraceWindow, DEFAULT_GRACE_DAYS};
pub use plan::SubscriptionPlan;
pub use status::SubscriptionStatus;
