//! Mock Timer implementation for testing

use crate::platform::traits::TimerInterface;

/// Mock Timer implementation
///
/// Uses simulated time advanced explicitly by tests, so timing-dependent
/// behavior (rate windows, timeouts) can be exercised deterministically.
#[derive(Debug)]
pub struct MockTimer {
    now_us: u64,
}

impl MockTimer {
    /// Create a new mock timer starting at time zero
    pub fn new() -> Self {
        Self { now_us: 0 }
    }

    /// Create a new mock timer starting at the given timestamp
    pub fn starting_at(now_us: u64) -> Self {
        Self { now_us }
    }

    /// Advance simulated time by the given number of microseconds
    pub fn advance_us(&mut self, us: u64) {
        self.now_us = self.now_us.wrapping_add(us);
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for MockTimer {
    fn now_us(&self) -> u64 {
        self.now_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_timer_advance() {
        let mut timer = MockTimer::new();
        assert_eq!(timer.now_us(), 0);

        timer.advance_us(1000);
        assert_eq!(timer.now_us(), 1000);

        timer.advance_us(500);
        assert_eq!(timer.now_us(), 1500);
    }

    #[test]
    fn test_mock_timer_starting_at() {
        let timer = MockTimer::starting_at(42_000);
        assert_eq!(timer.now_us(), 42_000);
    }

    #[test]
    fn test_mock_timer_now_ms() {
        let mut timer = MockTimer::new();
        timer.advance_us(3500);
        assert_eq!(timer.now_ms(), 3);
    }
}
