//! Domain layer - pure business logic.
//!
//! Contains the entitlement state machine, billing reconciliation, and
//! dunning logic. Nothing in this layer performs I/O; persistence and
//! notification delivery go through the ports.

pub mod billing;
pub mod entitlement;
pub mod foundation;
