//! Subscription status state machine.
//!
//! The single primary state variable for an account's entitlement. Statuses
//! reported by the payment processor map onto this closed enum; branching on
//! raw status strings is confined to `from_processor_str`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, ValidationError};

/// Subscription lifecycle status.
///
/// Exactly one value at a time per account. `BetaAccess` and `None` are
/// local-only states; the rest mirror what the payment processor reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Time-limited beta window granted by a redemption code.
    BetaAccess,

    /// Trial period reported by the processor. Full access.
    Trial,

    /// Fully paid subscription. Full access.
    Active,

    /// Payment failed but within the retry grace period.
    PastDue,

    /// User requested cancellation. Access continues until period end.
    Canceled,

    /// Payment retries exhausted by the processor. No access.
    Unpaid,

    /// No subscription has ever been set up.
    None,
}

impl SubscriptionStatus {
    /// Maps a processor-reported status string onto the local enum.
    ///
    /// `beta_access` and `none` never arrive from the processor and are
    /// rejected here.
    pub fn from_processor_str(s: &str) -> Result<Self, ValidationError> {
        match s {
            "trialing" | "trial" => Ok(Self::Trial),
            "active" => Ok(Self::Active),
            "past_due" => Ok(Self::PastDue),
            "canceled" => Ok(Self::Canceled),
            "unpaid" => Ok(Self::Unpaid),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unrecognized processor status '{}'", other),
            )),
        }
    }

    /// Stable snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BetaAccess => "beta_access",
            Self::Trial => "trial",
            Self::Active => "active",
            Self::PastDue => "past_due",
            Self::Canceled => "canceled",
            Self::Unpaid => "unpaid",
            Self::None => "none",
        }
    }

    /// Returns true if the processor currently owns a subscription object
    /// for this account.
    pub fn is_processor_managed(&self) -> bool {
        matches!(
            self,
            Self::Trial | Self::Active | Self::PastDue | Self::Canceled | Self::Unpaid
        )
    }
}

impl StateMachine for SubscriptionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubscriptionStatus::*;
        matches!(
            (self, target),
            // From NONE: beta redemption or first reconciliation
            (None, BetaAccess)
                | (None, Trial)
                | (None, Active)
            // From BETA_ACCESS: re-grant or upgrade to paid
                | (BetaAccess, BetaAccess)
                | (BetaAccess, Trial)
                | (BetaAccess, Active)
            // From TRIAL
                | (Trial, Active)
                | (Trial, PastDue)
                | (Trial, Canceled)
                | (Trial, Unpaid)
            // From ACTIVE
                | (Active, Active) // renewal
                | (Active, PastDue)
                | (Active, Canceled)
                | (Active, Unpaid)
            // From PAST_DUE
                | (PastDue, Active)
                | (PastDue, Canceled)
                | (PastDue, Unpaid)
            // From CANCELED / UNPAID: resubscribe
                | (Canceled, Active)
                | (Unpaid, Active)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubscriptionStatus::*;
        match self {
            None => vec![BetaAccess, Trial, Active],
            BetaAccess => vec![BetaAccess, Trial, Active],
            Trial => vec![Active, PastDue, Canceled, Unpaid],
            Active => vec![Active, PastDue, Canceled, Unpaid],
            PastDue => vec![Active, Canceled, Unpaid],
            Canceled => vec![Active],
            Unpaid => vec![Active],
        }
    }
}
