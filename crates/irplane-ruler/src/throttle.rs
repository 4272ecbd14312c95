//! Rate limiting for user-facing warnings.

use std::time::{Duration, Instant};

/// Lets a warning through at most once per interval.
#[derive(Debug, Clone, Default)]
pub struct WarningThrottle {
    last: Option<Instant>,
}

impl WarningThrottle {
    /// Create a throttle that lets the first warning through
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a warning may be shown now; records the time when it may
    pub fn should_warn(&mut self, interval: Duration) -> bool {
        self.should_warn_at(Instant::now(), interval)
    }

    /// Like [`should_warn`](Self::should_warn) with an explicit clock reading
    pub fn should_warn_at(&mut self, now: Instant, interval: Duration) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) <= interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_per_interval() {
        let interval = Duration::from_secs(10);
        let t0 = Instant::now();
        let mut throttle = WarningThrottle::new();

        assert!(throttle.should_warn_at(t0, interval));
        assert!(!throttle.should_warn_at(t0 + Duration::from_secs(3), interval));
        assert!(!throttle.should_warn_at(t0 + interval, interval));
        assert!(throttle.should_warn_at(t0 + Duration::from_millis(10_001), interval));
        assert!(!throttle.should_warn_at(t0 + Duration::from_secs(15), interval));
    }
}
