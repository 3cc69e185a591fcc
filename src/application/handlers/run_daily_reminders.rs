//! RunDailyRemindersHandler - the daily beta-expiry reminder sweep.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::billing::NotificationCommand;
use crate::domain::entitlement::EntitlementError;
use crate::domain::foundation::Clock;
use crate::ports::{AccountStore, NotificationDispatcher};

/// Lead times, in days before expiry, at which a reminder fires.
pub const DEFAULT_REMINDER_LEAD_DAYS: [i64; 5] = [30, 14, 7, 3, 1];

/// Counts from one reminder run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReminderRunReport {
    pub sent: usize,
    pub failed: usize,
}

/// Handler that sends beta-expiry reminders at fixed lead times.
///
/// Designed to run once per day. Each lead time selects accounts whose
/// beta access expires exactly that many days from today, so a given
/// account is reminded at most once per run and once per lead time
/// overall. A dispatch failure for one account never stops the sweep.
pub struct RunDailyRemindersHandler {
    store: Arc<dyn AccountStore>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    clock: Arc<dyn Clock>,
    lead_days: Vec<i64>,
}

impl RunDailyRemindersHandler {
    pub fn new(
        store: Arc<dyn AccountStore>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        clock: Arc<dyn Clock>,
        lead_days: Vec<i64>,
    ) -> Self {
        Self {
            store,
            dispatcher,
            clock,
            lead_days,
        }
    }

    pub async fn handle(&self) -> Result<ReminderRunReport, EntitlementError> {
        let today = self.clock.now().start_of_day();
        let mut report = ReminderRunReport::default();

        for &lead in &self.lead_days {
            let from = today.add_days(lead);
            let to = from.add_days(1);

            let accounts = self
                .store
                .list_beta_expiring_between(from, to)
                .await
                .map_err(|e| EntitlementError::storage(e.to_string()))?;

            for account in accounts {
                let Some(expires_at) = account.beta_expires_at else {
                    continue;
                };
                let command =
                    NotificationCommand::beta_expiry_reminder(&account, lead, expires_at);
                match self.dispatcher.send(&command).await {
                    Ok(()) => report.sent += 1,
                    Err(e) => {
                        report.failed += 1;
                        warn!(
                            account_id = %account.id,
                            lead_days = lead,
                            error = %e,
                            "Beta expiry reminder dispatch failed"
                        );
                    }
                }
            }
        }

        info!(
            sent = report.sent,
            failed = report.failed,
            "Beta expiry reminder run finished"
        );
        Ok(report)
    }
}
