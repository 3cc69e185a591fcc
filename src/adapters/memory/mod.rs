//! In-memory adapter implementations.
//!
//! Useful for tests, development, and as reference semantics for the
//! production adapters.

mod account_store;
mod beta_codes;
mod dispatcher;

pub use account_store::InMemoryAccountStore;
pub use beta_codes::StaticBetaCodeDirectory;
pub use dispatcher::RecordingDispatcher;
