//! Pulse meter driver
//!
//! Ties the counter exchange, rate estimator, and state machine together
//! into the per-tick poll routine, and keeps the cumulative totals.

use crate::platform::traits::TimerInterface;
use crate::{log_debug, log_info};

use super::config::PulseMeterConfig;
use super::detector::EdgeDetector;
use super::rate::RateEstimator;
use super::sink::MeterSink;
use super::state::{MeterState, MeterStateMachine, TickDecision};

/// Pulse rate meter
///
/// Owns the poll-context half of the sensor: the interrupt-context half
/// lives in the [`EdgeDetector`], which is shared by reference so the edge
/// interrupt can reach it. One call to [`PulseMeter::poll`] per scheduler
/// tick consumes everything the detector accumulated since the previous
/// tick and publishes the outcome to the sink.
pub struct PulseMeter<'a> {
    config: PulseMeterConfig,
    detector: &'a EdgeDetector,
    state: MeterStateMachine,
    rate: RateEstimator,
    total_pulses: u32,
    forward_total: u32,
    reverse_total: u32,
}

impl<'a> PulseMeter<'a> {
    /// Create a meter reading from the given detector
    pub fn new(detector: &'a EdgeDetector, config: PulseMeterConfig) -> Self {
        Self {
            config,
            detector,
            state: MeterStateMachine::new(),
            rate: RateEstimator::new(),
            total_pulses: 0,
            forward_total: 0,
            reverse_total: 0,
        }
    }

    /// Arm the meter
    ///
    /// Sets the idle baseline to "now" so the first timeout window starts at
    /// setup rather than at time zero, and logs the configuration.
    pub fn setup<T: TimerInterface>(&mut self, timer: &T) {
        let now_us = timer.now_us() as u32;
        self.rate.reset_baseline(now_us);
        log_info!(
            "Pulse meter: assuming 0 pulses/min after {} s without a pulse",
            self.config.timeout_us / 1_000_000
        );
    }

    /// Process one poll tick
    ///
    /// Exchanges the counter buffers, updates totals, drives the state
    /// machine, and publishes at most one rate to the sink. Every tick
    /// produces a well-defined outcome: publish nothing, publish a computed
    /// rate, or publish a one-shot zero on timeout.
    pub fn poll<T: TimerInterface, S: MeterSink>(&mut self, timer: &T, sink: &mut S) {
        let settled = self.detector.reset_and_rotate();

        if settled.has_edges() {
            self.accumulate_totals(&settled, sink);

            match self.state.tick(true, 0, self.config.timeout_us) {
                // First edge after Initial or TimedOut: a valid pulse width
                // needs two processed edges, so only the baseline moves
                TickDecision::Baseline => {}
                TickDecision::PublishRate => {
                    sink.publish_rate(self.rate.pulses_per_minute(&settled));
                }
                TickDecision::ReportTimeout | TickDecision::Idle => {}
            }

            self.rate.commit(&settled);
        } else {
            let now_us = timer.now_us() as u32;
            let idle_us = self.rate.idle_elapsed_us(now_us);
            if let TickDecision::ReportTimeout =
                self.state.tick(false, idle_us, self.config.timeout_us)
            {
                log_debug!(
                    "No pulse detected for {} s, assuming 0 pulses/min",
                    idle_us / 1_000_000
                );
                sink.publish_rate(0.0);
            }
        }
    }

    /// Overwrite the cumulative pulse total
    ///
    /// Used to restore a persisted counter at startup. The new value is
    /// republished immediately, independent of poll timing; the forward and
    /// reverse accumulators are unaffected.
    pub fn set_total_pulses<S: MeterSink>(&mut self, pulses: u32, sink: &mut S) {
        self.total_pulses = pulses;
        sink.publish_total(self.total_pulses);
    }

    /// Current lifecycle state
    pub fn state(&self) -> MeterState {
        self.state.state()
    }

    /// Cumulative net pulse total (wrapping)
    pub fn total_pulses(&self) -> u32 {
        self.total_pulses
    }

    /// Cumulative forward pulse total (wrapping)
    pub fn forward_total(&self) -> u32 {
        self.forward_total
    }

    /// Cumulative reverse pulse total (wrapping)
    pub fn reverse_total(&self) -> u32 {
        self.reverse_total
    }

    /// Fold a settled record into the totals and mirror the ones that changed
    fn accumulate_totals<S: MeterSink>(
        &mut self,
        settled: &super::buffer::EdgeRecord,
        sink: &mut S,
    ) {
        if settled.forward > 0 {
            self.forward_total = self.forward_total.wrapping_add(settled.forward);
            if self.config.report_forward_total {
                sink.publish_forward_total(self.forward_total);
            }
        }
        if settled.reverse > 0 {
            self.reverse_total = self.reverse_total.wrapping_add(settled.reverse);
            if self.config.report_reverse_total {
                sink.publish_reverse_total(self.reverse_total);
            }
        }

        let net = RateEstimator::net_count(settled);
        if net != 0 {
            // A reverse-dominant window walks the net total backwards; on
            // sustained flow the counters wrap rather than saturate
            self.total_pulses = self.total_pulses.wrapping_add_signed(net);
            if self.config.report_total {
                sink.publish_total(self.total_pulses);
            }
        }
    }
}
