//! Subscription plan billing cadence.

use serde::{Deserialize, Serialize};

/// Billing cadence for a paid subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Monthly,
    Annual,
}

impl SubscriptionPlan {
    /// Derives the plan from a processor billing interval.
    ///
    /// `year` maps to annual; everything else is treated as monthly.
    pub fn from_interval(interval: &str) -> Self {
        if interval.eq_ignore_ascii_case("year") {
            Self::Annual
        } else {
            Self::Monthly
        }
    }

    /// Parses an explicit plan name, if recognized.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "annual" | "yearly" => Some(Self::Annual),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Annual => "Annual",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_interval_is_annual() {
        assert_eq!(SubscriptionPlan::from_interval("year"), SubscriptionPlan::Annual);
    }

    #[test]
    fn other_intervals_default_to_monthly() {
        assert_eq!(SubscriptionPlan::from_interval("month"), SubscriptionPlan::Monthly);
        assert_eq!(SubscriptionPlan::from_interval("week"), SubscriptionPlan::Monthly);
    }

    #[test]
    fn explicit_names_parse() {
        assert_eq!(SubscriptionPlan::from_name("annual"), Some(SubscriptionPlan::Annual));
        assert_eq!(SubscriptionPlan::from_name("monthly"), Some(SubscriptionPlan::Monthly));
        assert_eq!(SubscriptionPlan::from_name("lifetime"), None);
    }
}
