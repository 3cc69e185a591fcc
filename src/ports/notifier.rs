//! Notification dispatch port.
//!
//! The core decides *that* and *when* a notification should fire; building
//! and transmitting the content is this collaborator's job. Dispatch
//! failures never roll back an already-applied state change.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::billing::NotificationCommand;

/// Failure to hand a notification to the delivery channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Notification dispatch failed: {0}")]
pub struct DispatchError(pub String);

/// Outbound notification delivery.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send(&self, command: &NotificationCommand) -> Result<(), DispatchError>;
}
