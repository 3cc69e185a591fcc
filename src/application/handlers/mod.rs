//! Entitlement and billing handlers.

mod check_entitlement;
mod reconcile_notification;
mod record_payment_failure;
mod redeem_beta_code;
mod run_daily_reminders;

pub use check_entitlement::{CheckEntitlementHandler, CheckEntitlementQuery, CheckEntitlementResult};
pub use reconcile_notification::{
    ReconcileNotificationCommand, ReconcileNotificationHandler, ReconcileOutcome,
};
pub use record_payment_failure::{
    RecordPaymentFailureCommand, RecordPaymentFailureHandler, RecordPaymentFailureResult,
};
pub use redeem_beta_code::{RedeemBetaCodeCommand, RedeemBetaCodeHandler, RedeemBetaCodeResult};
pub use run_daily_reminders::{
    ReminderRunReport, RunDailyRemindersHandler, DEFAULT_REMINDER_LEAD_DAYS,
};
