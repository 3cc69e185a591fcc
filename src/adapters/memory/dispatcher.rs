//! Recording notification dispatcher.
//!
//! Collects every command it is asked to send. Individual accounts can be
//! marked as failing to exercise fault-isolation paths.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::billing::NotificationCommand;
use crate::domain::foundation::AccountId;
use crate::ports::{DispatchError, NotificationDispatcher};

/// Dispatcher that records commands instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct RecordingDispatcher {
    sent: Arc<RwLock<Vec<NotificationCommand>>>,
    failing: Arc<RwLock<HashSet<AccountId>>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands sent so far, in order.
    pub async fn sent(&self) -> Vec<NotificationCommand> {
        self.sent.read().await.clone()
    }

    /// Makes every send for this account fail.
    pub async fn fail_for(&self, account_id: AccountId) {
        self.failing.write().await.insert(account_id);
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn send(&self, command: &NotificationCommand) -> Result<(), DispatchError> {
        if self.failing.read().await.contains(&command.account_id) {
            return Err(DispatchError(format!(
                "injected failure for account {}",
                command.account_id
            )));
        }
        self.sent.write().await.push(command.clone());
        Ok(())
    }
}
