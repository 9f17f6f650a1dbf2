//! End-to-end meter scenarios
//!
//! Drives the full driver (detector, buffer exchange, estimator, state
//! machine, totals) through realistic edge/poll sequences on the mock
//! platform and asserts on exactly what reaches the sink.

use pulse_meter::meter::{
    EdgeDetector, MeterState, PulseMeter, PulseMeterConfig, RecordingSink,
};
use pulse_meter::platform::mock::MockTimer;
use pulse_meter::platform::traits::TimerInterface;

const TIMEOUT_US: u32 = 2_000_000;

fn test_config() -> PulseMeterConfig {
    PulseMeterConfig::default()
        .with_timeout_us(TIMEOUT_US)
        .with_total_reporting()
        .with_forward_total_reporting()
        .with_reverse_total_reporting()
}

/// Record one forward edge at the timer's current instant
fn forward_edge(detector: &EdgeDetector, timer: &MockTimer) {
    detector.on_edge(timer.now_us() as u32, true);
}

#[test]
fn scenario_a_quiet_start_stays_initial() {
    let detector = EdgeDetector::new();
    let mut meter = PulseMeter::new(&detector, test_config());
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();
    meter.setup(&timer);

    // Several quiet polls well inside the timeout window
    for _ in 0..4 {
        timer.advance_us(u64::from(TIMEOUT_US) / 8);
        meter.poll(&timer, &mut sink);
    }

    assert_eq!(meter.state(), MeterState::Initial);
    assert!(sink.rates.is_empty());
    assert!(sink.totals.is_empty());
}

#[test]
fn scenario_b_second_edge_yields_rate() {
    let detector = EdgeDetector::new();
    let mut meter = PulseMeter::new(&detector, test_config());
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();
    meter.setup(&timer);

    // First edge only establishes the baseline
    timer.advance_us(10_000);
    forward_edge(&detector, &timer);
    meter.poll(&timer, &mut sink);
    assert_eq!(meter.state(), MeterState::Running);
    assert!(sink.rates.is_empty());

    // Second edge 500ms later: 60_000_000 / 500_000 = 120 pulses/min
    timer.advance_us(500_000);
    forward_edge(&detector, &timer);
    meter.poll(&timer, &mut sink);

    assert_eq!(sink.rates.len(), 1);
    assert!((sink.rates[0] - 120.0).abs() < 1e-3);
}

#[test]
fn scenario_c_mixed_window_publishes_net_rate() {
    let detector = EdgeDetector::new();
    let mut meter = PulseMeter::new(&detector, test_config());
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();
    meter.setup(&timer);

    // Baseline edge
    forward_edge(&detector, &timer);
    meter.poll(&timer, &mut sink);

    // Two forward edges, a direction-change marker, one reverse edge
    timer.advance_us(100_000);
    forward_edge(&detector, &timer);
    timer.advance_us(100_000);
    forward_edge(&detector, &timer);
    timer.advance_us(100_000);
    detector.on_edge(timer.now_us() as u32, false); // marker, not counted
    timer.advance_us(100_000);
    detector.on_edge(timer.now_us() as u32, false); // reverse
    meter.poll(&timer, &mut sink);

    // Net one pulse over the elapsed window: nonzero positive rate
    assert_eq!(sink.rates.len(), 1);
    assert!(sink.rates[0] > 0.0);
    assert_eq!(meter.forward_total(), 3);
    assert_eq!(meter.reverse_total(), 1);
    assert_eq!(meter.total_pulses(), 2);
}

#[test]
fn scenario_d_timeout_publishes_zero_exactly_once() {
    let detector = EdgeDetector::new();
    let mut meter = PulseMeter::new(&detector, test_config());
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();
    meter.setup(&timer);

    // Get to Running with a published rate
    forward_edge(&detector, &timer);
    meter.poll(&timer, &mut sink);
    timer.advance_us(500_000);
    forward_edge(&detector, &timer);
    meter.poll(&timer, &mut sink);
    assert_eq!(sink.rates.len(), 1);

    // Silence past the timeout
    timer.advance_us(u64::from(TIMEOUT_US) + 1);
    meter.poll(&timer, &mut sink);
    assert_eq!(meter.state(), MeterState::TimedOut);
    assert_eq!(sink.rates.len(), 2);
    assert_eq!(sink.rates[1], 0.0);

    // Further quiet polls publish nothing more
    for _ in 0..3 {
        timer.advance_us(u64::from(TIMEOUT_US));
        meter.poll(&timer, &mut sink);
    }
    assert_eq!(sink.rates.len(), 2);

    // A fresh edge re-arms the meter without publishing a rate
    forward_edge(&detector, &timer);
    meter.poll(&timer, &mut sink);
    assert_eq!(meter.state(), MeterState::Running);
    assert_eq!(sink.rates.len(), 2);
}

#[test]
fn scenario_e_total_override_mid_run() {
    let detector = EdgeDetector::new();
    let mut meter = PulseMeter::new(&detector, test_config());
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();
    meter.setup(&timer);

    forward_edge(&detector, &timer);
    meter.poll(&timer, &mut sink);
    assert_eq!(sink.totals.as_slice(), &[1]);

    meter.set_total_pulses(500, &mut sink);
    assert_eq!(meter.total_pulses(), 500);
    assert_eq!(sink.totals.as_slice(), &[1, 500]);

    // Forward/reverse accumulators unaffected by the override
    assert_eq!(meter.forward_total(), 1);
    assert_eq!(meter.reverse_total(), 0);

    // Counting continues from the restored value
    timer.advance_us(250_000);
    forward_edge(&detector, &timer);
    meter.poll(&timer, &mut sink);
    assert_eq!(meter.total_pulses(), 501);
}

#[test]
fn quiet_polls_are_idempotent() {
    let detector = EdgeDetector::new();
    let mut meter = PulseMeter::new(&detector, test_config());
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();
    meter.setup(&timer);

    forward_edge(&detector, &timer);
    meter.poll(&timer, &mut sink);
    let totals_before = (
        meter.total_pulses(),
        meter.forward_total(),
        meter.reverse_total(),
    );
    let publishes_before = (sink.rates.len(), sink.totals.len());

    // Edge-free polls inside the timeout window change nothing
    for _ in 0..5 {
        timer.advance_us(10_000);
        meter.poll(&timer, &mut sink);
    }

    assert_eq!(
        (
            meter.total_pulses(),
            meter.forward_total(),
            meter.reverse_total()
        ),
        totals_before
    );
    assert_eq!((sink.rates.len(), sink.totals.len()), publishes_before);
}

#[test]
fn totals_are_monotonic_for_forward_flow() {
    let detector = EdgeDetector::new();
    let mut meter = PulseMeter::new(&detector, test_config());
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();
    meter.setup(&timer);

    let mut last_total = 0;
    for burst in 1..=5u32 {
        for _ in 0..burst {
            timer.advance_us(50_000);
            forward_edge(&detector, &timer);
        }
        meter.poll(&timer, &mut sink);

        assert!(meter.total_pulses() >= last_total);
        last_total = meter.total_pulses();
    }

    assert_eq!(meter.total_pulses(), 1 + 2 + 3 + 4 + 5);
    // Mirrored totals arrived in nondecreasing order
    assert!(sink.totals.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn delayed_poll_loses_no_pulses() {
    let detector = EdgeDetector::new();
    let mut meter = PulseMeter::new(&detector, test_config());
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();
    meter.setup(&timer);

    // Many edges accumulate while the poll context is starved
    for _ in 0..100 {
        timer.advance_us(1_000);
        forward_edge(&detector, &timer);
    }
    meter.poll(&timer, &mut sink);

    assert_eq!(meter.forward_total(), 100);
    assert_eq!(meter.total_pulses(), 100);
}

#[test]
fn reverse_flow_reports_negative_rate() {
    let detector = EdgeDetector::new();
    let mut meter = PulseMeter::new(&detector, test_config());
    let mut timer = MockTimer::new();
    let mut sink = RecordingSink::new();
    meter.setup(&timer);

    // Baseline, then switch direction
    forward_edge(&detector, &timer);
    meter.poll(&timer, &mut sink);
    timer.advance_us(10_000);
    detector.on_edge(timer.now_us() as u32, false); // marker
    meter.poll(&timer, &mut sink);

    // Reverse-only window: net negative, rate published with a minus sign
    timer.advance_us(500_000);
    detector.on_edge(timer.now_us() as u32, false);
    meter.poll(&timer, &mut sink);

    let rate = *sink.rates.last().unwrap();
    assert!(rate < 0.0);
}
