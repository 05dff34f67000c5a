//! Post-submission auto-reset timer

use std::time::{Duration, Instant};

/// A scheduled reset owned by the wizard.
///
/// The timer never fires on its own; the owner polls it with the current
/// instant. Dropping it cancels the reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTimer {
    deadline: Instant,
}

impl ResetTimer {
    /// Delay used when no configuration overrides it
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

    pub fn schedule(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: now + delay,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Whether the reset is due at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Time left before the reset, zero once due
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_deadline() {
        let start = Instant::now();
        let timer = ResetTimer::schedule(start, ResetTimer::DEFAULT_DELAY);
        assert!(!timer.is_due(start));
        assert!(!timer.is_due(start + Duration::from_millis(4999)));
    }

    #[test]
    fn test_due_at_and_after_deadline() {
        let start = Instant::now();
        let timer = ResetTimer::schedule(start, Duration::from_secs(5));
        assert!(timer.is_due(start + Duration::from_secs(5)));
        assert!(timer.is_due(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_remaining_saturates() {
        let start = Instant::now();
        let timer = ResetTimer::schedule(start, Duration::from_secs(5));
        assert_eq!(timer.remaining(start + Duration::from_secs(2)), Duration::from_secs(3));
        assert_eq!(timer.remaining(start + Duration::from_secs(9)), Duration::ZERO);
        assert_eq!(timer.deadline(), start + Duration::from_secs(5));
    }
}
