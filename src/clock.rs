use std::time::Instant;

/// Monotonic time source, in elapsed milliseconds since the clock was
/// created. Must never go backward between two calls within a run.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> f64;
}

/// Production clock backed by `std::time::Instant`.
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_does_not_go_backward() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = test_support::ManualClock::new();
        assert_eq!(clock.now_ms(), 0.0);
        clock.advance(12.5);
        assert_eq!(clock.now_ms(), 12.5);
        clock.advance(0.5);
        assert_eq!(clock.now_ms(), 13.0);
    }
}
