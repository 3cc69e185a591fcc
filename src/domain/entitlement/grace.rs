//! Shared grace period policy.
//!
//! The "7 extra days after lapse" rule is defined exactly once here and
//! reused by the entitlement evaluator, the reconciliation reducer, and
//! reminder handling. Beta access deliberately does not use it.

use crate::domain::foundation::Timestamp;

/// Grace window length applied after `past_due` and `canceled` lapses.
pub const DEFAULT_GRACE_DAYS: i64 = 7;

const SECS_PER_DAY: i64 = 86_400;

/// Result of a grace window check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraceWindow {
    /// Whether `now` still falls inside the window (inclusive of its end).
    pub active: bool,
    /// Whole days until the window closes, rounded up and clamped to >= 0.
    pub days_remaining: i64,
}

/// Checks whether `now` falls within `grace_days` after `expiry`.
pub fn grace_window(expiry: Timestamp, now: Timestamp, grace_days: i64) -> GraceWindow {
    let deadline = expiry.add_days(grace_days);
    GraceWindow {
        active: now <= deadline,
        days_remaining: days_until(now, deadline),
    }
}

/// Whole days from `now` until `target`, rounded up, clamped to >= 0.
///
/// Corrupted timestamps that would yield negative day counts clamp to 0
/// rather than surfacing negative "days remaining" values.
pub fn days_until(now: Timestamp, target: Timestamp) -> i64 {
    let secs = target.duration_since(&now).num_seconds();
    if secs <= 0 {
        return 0;
    }
    (secs + SECS_PER_DAY - 1) / SECS_PER_DAY
}
