//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AccountStore` - account persistence with optimistic concurrency
//! - `NotificationDispatcher` - outbound notification delivery
//! - `BetaCodeDirectory` - beta redemption code lookup

mod account_store;
mod beta_codes;
mod notifier;

pub use account_store::{AccountStore, SaveOutcome, StorageError};
pub use beta_codes::{BetaCodeDirectory, BetaGrant};
pub use notifier::{DispatchError, NotificationDispatcher};
