//! Edge-to-rate conversion
//!
//! Converts the settled counts and elapsed time of one poll window into a
//! pulses-per-minute value, and tracks the timestamp of the most recently
//! processed edge as the baseline for both rate and timeout computation.

use super::buffer::EdgeRecord;

const MICROS_PER_MINUTE: f32 = 60.0 * 1_000_000.0;

/// Rate estimator over settled edge records
///
/// Holds `last_processed_edge_us`, the reference point from which both the
/// pulse-width window and the no-signal idle time are measured. All
/// timestamp arithmetic is wrapping 32-bit, so the microsecond counter may
/// wrap freely underneath it.
#[derive(Debug, Clone, Copy)]
pub struct RateEstimator {
    last_processed_edge_us: u32,
}

impl RateEstimator {
    /// Create an estimator with its baseline at time zero
    pub const fn new() -> Self {
        Self {
            last_processed_edge_us: 0,
        }
    }

    /// Reset the baseline, typically to "now" at setup
    ///
    /// Gives the first timeout window a defined starting point before any
    /// edge has been seen.
    pub fn reset_baseline(&mut self, now_us: u32) {
        self.last_processed_edge_us = now_us;
    }

    /// Signed net pulse count of a settled record
    ///
    /// Forward minus reverse, computed in the counters' wrapping width.
    pub fn net_count(record: &EdgeRecord) -> i32 {
        record.forward.wrapping_sub(record.reverse) as i32
    }

    /// Pulses per minute for a settled record, measured from the baseline
    ///
    /// A zero net count yields 0.0: equal forward and reverse edges in one
    /// window are indistinguishable from no motion. A reverse-dominant
    /// window yields a negative rate (net reverse flow). The result is
    /// always finite; a zero-width window also yields 0.0.
    pub fn pulses_per_minute(&self, settled: &EdgeRecord) -> f32 {
        let net = Self::net_count(settled);
        if net == 0 {
            return 0.0;
        }

        let elapsed_us = settled.last_edge_us.wrapping_sub(self.last_processed_edge_us);
        if elapsed_us == 0 {
            return 0.0;
        }

        // Time per net pulse; sign carries the flow direction
        let pulse_width_us = elapsed_us as f32 / net as f32;
        MICROS_PER_MINUTE / pulse_width_us
    }

    /// Advance the baseline to a consumed record's last edge
    ///
    /// Called by the poll routine after processing a settled record with at
    /// least one edge, whether or not a rate was published.
    pub fn commit(&mut self, settled: &EdgeRecord) {
        self.last_processed_edge_us = settled.last_edge_us;
    }

    /// Microseconds since the last processed edge
    ///
    /// Wraparound-safe; used by the poll routine for timeout detection.
    pub fn idle_elapsed_us(&self, now_us: u32) -> u32 {
        now_us.wrapping_sub(self.last_processed_edge_us)
    }
}

impl Default for RateEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(last_edge_us: u32, forward: u32, reverse: u32) -> EdgeRecord {
        EdgeRecord {
            last_edge_us,
            forward,
            reverse,
        }
    }

    #[test]
    fn test_single_pulse_rate() {
        let mut estimator = RateEstimator::new();
        estimator.reset_baseline(0);
        estimator.commit(&record(1_000_000, 1, 0));

        // One net pulse 500ms after the previous edge: 120 pulses/min
        let rate = estimator.pulses_per_minute(&record(1_500_000, 1, 0));
        assert!((rate - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_multiple_pulses_divide_the_window() {
        let mut estimator = RateEstimator::new();
        estimator.commit(&record(0, 1, 0));

        // Two net pulses over one second: 500ms per pulse, 120 pulses/min
        let rate = estimator.pulses_per_minute(&record(1_000_000, 2, 0));
        assert!((rate - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_net_zero_window_reports_zero() {
        let estimator = RateEstimator::new();
        let rate = estimator.pulses_per_minute(&record(1_000_000, 2, 2));
        assert_eq!(rate, 0.0);
    }

    #[test]
    fn test_mixed_window_uses_net_count() {
        let mut estimator = RateEstimator::new();
        estimator.commit(&record(0, 1, 0));

        // Two forward, one reverse: net 1 over 500ms
        let rate = estimator.pulses_per_minute(&record(500_000, 2, 1));
        assert!((rate - 120.0).abs() < 1e-3);
        assert!(rate > 0.0);
    }

    #[test]
    fn test_reverse_dominant_window_is_negative() {
        let mut estimator = RateEstimator::new();
        estimator.commit(&record(0, 1, 0));

        let rate = estimator.pulses_per_minute(&record(500_000, 0, 1));
        assert!((rate + 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_width_window_stays_finite() {
        let estimator = RateEstimator::new();
        // Edge timestamp equals the baseline: no width to divide by
        let rate = estimator.pulses_per_minute(&record(0, 1, 0));
        assert_eq!(rate, 0.0);
    }

    #[test]
    fn test_rate_across_timestamp_wraparound() {
        let mut estimator = RateEstimator::new();
        estimator.commit(&record(u32::MAX - 249_999, 1, 0));

        // The counter wraps between the two edges; wrapping_sub recovers the
        // true 500ms window
        let rate = estimator.pulses_per_minute(&record(250_000, 1, 0));
        assert!((rate - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_idle_elapsed_wraparound() {
        let mut estimator = RateEstimator::new();
        estimator.reset_baseline(u32::MAX - 99);
        assert_eq!(estimator.idle_elapsed_us(100), 200);
    }

    #[test]
    fn test_net_count_signs() {
        assert_eq!(RateEstimator::net_count(&record(0, 3, 1)), 2);
        assert_eq!(RateEstimator::net_count(&record(0, 1, 3)), -2);
        assert_eq!(RateEstimator::net_count(&record(0, 2, 2)), 0);
    }
}
