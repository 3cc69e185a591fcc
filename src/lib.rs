//! Quillflow Entitlements - Subscription Access and Dunning Engine
//!
//! This crate decides whether an account may use the gated Quillflow
//! feature set, reconciles externally reported billing events into local
//! subscription state, and schedules payment-failure retries and beta
//! expiry reminders.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
