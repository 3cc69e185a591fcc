//! Application layer - command and query handlers.
//!
//! Handlers wire domain logic to the ports: they load account snapshots,
//! run the pure domain functions, persist through compare-and-swap with
//! bounded retries, and dispatch any emitted notification commands.

pub mod handlers;
