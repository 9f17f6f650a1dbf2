//! Reporting sink interface
//!
//! The meter publishes its measurements through this trait; what happens to
//! them afterwards (MQTT, persistence, a display) is the caller's business.

/// Destination for published meter values
///
/// `publish_rate` receives a finite pulses-per-minute value (possibly 0.0,
/// never NaN) once per poll tick on which a decision was made. The total
/// methods are called only when the corresponding accumulator changed and
/// its mirroring is enabled in the configuration.
pub trait MeterSink {
    /// Publish the primary metric, pulses per minute
    ///
    /// Negative values indicate net reverse flow.
    fn publish_rate(&mut self, pulses_per_minute: f32);

    /// Publish the cumulative pulse total
    fn publish_total(&mut self, pulses: u32);

    /// Publish the cumulative forward pulse total
    fn publish_forward_total(&mut self, pulses: u32);

    /// Publish the cumulative reverse pulse total
    fn publish_reverse_total(&mut self, pulses: u32);
}

/// Recording sink for tests
///
/// Captures every published value in order so tests can assert on exactly
/// what was reported, and how often.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Rates in publish order
    pub rates: heapless::Vec<f32, 32>,
    /// Cumulative totals in publish order
    pub totals: heapless::Vec<u32, 32>,
    /// Forward totals in publish order
    pub forward_totals: heapless::Vec<u32, 32>,
    /// Reverse totals in publish order
    pub reverse_totals: heapless::Vec<u32, 32>,
}

#[cfg(any(test, feature = "mock"))]
impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently published rate, if any
    pub fn last_rate(&self) -> Option<f32> {
        self.rates.last().copied()
    }

    /// The most recently published total, if any
    pub fn last_total(&self) -> Option<u32> {
        self.totals.last().copied()
    }
}

#[cfg(any(test, feature = "mock"))]
impl MeterSink for RecordingSink {
    fn publish_rate(&mut self, pulses_per_minute: f32) {
        let _ = self.rates.push(pulses_per_minute);
    }

    fn publish_total(&mut self, pulses: u32) {
        let _ = self.totals.push(pulses);
    }

    fn publish_forward_total(&mut self, pulses: u32) {
        let _ = self.forward_totals.push(pulses);
    }

    fn publish_reverse_total(&mut self, pulses: u32) {
        let _ = self.reverse_totals.push(pulses);
    }
}
