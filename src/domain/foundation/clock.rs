//! Injectable time source.
//!
//! All temporal decisions in the domain take an explicit `Timestamp`, and
//! the application layer obtains that timestamp from a `Clock`. This keeps
//! entitlement evaluation and reconciliation deterministic under test.

use std::sync::Mutex;

use super::Timestamp;

/// Supplies the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock pinned to a fixed instant, advanceable by hand.
///
/// Intended for tests and deterministic batch replays.
pub struct FixedClock {
    now: Mutex<Timestamp>,
}

impl FixedClock {
    /// Creates a clock pinned to the given instant.
    pub fn at(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to a new instant.
    pub fn set(&self, now: Timestamp) {
        *self.now.lock().expect("clock lock poisoned") = now;
    }

    /// Advances the clock by the given number of days.
    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now = now.add_days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().expect("clock lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_pinned_instant() {
        let pinned = Timestamp::now().minus_days(10);
        let clock = FixedClock::at(pinned);
        assert_eq!(clock.now(), pinned);
        assert_eq!(clock.now(), pinned);
    }

    #[test]
    fn fixed_clock_advances() {
        let pinned = Timestamp::now();
        let clock = FixedClock::at(pinned);
        clock.advance_days(3);
        assert_eq!(clock.now(), pinned.add_days(3));
    }

    #[test]
    fn system_clock_tracks_real_time() {
        let before = Timestamp::now();
        let now = SystemClock.now();
        assert!(!now.is_before(&before));
    }
}
