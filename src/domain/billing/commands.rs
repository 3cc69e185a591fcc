//! Outbound notification commands.
//!
//! The reducer and the reminder scheduler recommend notifications; actual
//! rendering and transport belong to the dispatch collaborator. A command
//! carries everything that collaborator needs to build the message.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entitlement::Account;
use crate::domain::foundation::{AccountId, Timestamp};

use super::FailureDetail;

/// What kind of notification should be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Renewal,
    PaymentFailed,
    ActionRequired,
    BetaExpiryReminder,
    SubscriptionConfirmed,
}

/// A recommendation to send one notification to one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCommand {
    pub kind: NotificationKind,
    pub account_id: AccountId,
    pub email: String,
    pub payload: serde_json::Value,
}

impl NotificationCommand {
    /// Renewal notice for an already-active subscription.
    pub fn renewal(account: &Account) -> Self {
        Self {
            kind: NotificationKind::Renewal,
            account_id: account.id,
            email: account.email.clone(),
            payload: json!({
                "current_period_end": account.current_period_end,
                "plan": account.subscription_plan,
            }),
        }
    }

    /// Confirmation for a subscription that just became active.
    pub fn subscription_confirmed(account: &Account) -> Self {
        Self {
            kind: NotificationKind::SubscriptionConfirmed,
            account_id: account.id,
            email: account.email.clone(),
            payload: json!({
                "current_period_end": account.current_period_end,
                "plan": account.subscription_plan,
            }),
        }
    }

    /// Payment-failed notice carrying the failure detail.
    pub fn payment_failed(account: &Account, failure: &FailureDetail) -> Self {
        Self {
            kind: NotificationKind::PaymentFailed,
            account_id: account.id,
            email: account.email.clone(),
            payload: json!({
                "reason": failure.reason,
                "amount_due": failure.amount_due,
                "invoice_id": failure.invoice_id,
            }),
        }
    }

    /// Customer action needed (for example payment confirmation).
    pub fn action_required(account: &Account) -> Self {
        Self {
            kind: NotificationKind::ActionRequired,
            account_id: account.id,
            email: account.email.clone(),
            payload: json!({
                "subscription_id": account.external_subscription_id,
            }),
        }
    }

    /// Beta expiry reminder for one lead-time bucket.
    pub fn beta_expiry_reminder(account: &Account, lead_days: i64, expires_at: Timestamp) -> Self {
        Self {
            kind: NotificationKind::BetaExpiryReminder,
            account_id: account.id,
            email: account.email.clone(),
            payload: json!({
                "lead_days": lead_days,
                "expires_at": expires_at,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entitlement::SubscriptionStatus;

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000).unwrap()
    }

    fn account() -> Account {
        let mut account = Account::new(AccountId::new(), "writer@example.com", now());
        account.subscription_status = SubscriptionStatus::Active;
        account.current_period_end = Some(now().add_days(30));
        account
    }

    #[test]
    fn renewal_command_addresses_the_account() {
        let account = account();
        let command = NotificationCommand::renewal(&account);
        assert_eq!(command.kind, NotificationKind::Renewal);
        assert_eq!(command.account_id, account.id);
        assert_eq!(command.email, "writer@example.com");
    }

    #[test]
    fn payment_failed_carries_failure_detail() {
        let failure = FailureDetail {
            reason: "card_declined".to_string(),
            amount_due: 1500,
            invoice_id: "in_123".to_string(),
        };
        let command = NotificationCommand::payment_failed(&account(), &failure);
        assert_eq!(command.kind, NotificationKind::PaymentFailed);
        assert_eq!(command.payload["amount_due"], 1500);
        assert_eq!(command.payload["invoice_id"], "in_123");
    }

    #[test]
    fn beta_reminder_tags_the_lead_bucket() {
        let command = NotificationCommand::beta_expiry_reminder(&account(), 7, now().add_days(7));
        assert_eq!(command.kind, NotificationKind::BetaExpiryReminder);
        assert_eq!(command.payload["lead_days"], 7);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&NotificationKind::BetaExpiryReminder).unwrap();
        assert_eq!(json, "\"beta_expiry_reminder\"");
    }
}
