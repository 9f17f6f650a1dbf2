//! Async glue for Embassy executors
//!
//! Wires the meter core to an edge event source and a periodic poll cadence.
//! Both tasks borrow the same [`EdgeDetector`] static: the edge task stands
//! in for the interrupt context, the poll task for the scheduler-driven
//! poll context.

use core::future::Future;

use crate::platform::traits::{GpioInterface, TimerInterface};

use super::detector::EdgeDetector;
use super::sensor::PulseMeter;
use super::sink::MeterSink;

/// Drive the detector from an edge event source
///
/// `wait_for_edge` resolves once per rising edge of the pulse input, e.g.
/// `|| pin.wait_for_rising_edge()` on an Embassy input. The timestamp is
/// captured before the discriminator read so it reflects the edge time.
///
/// Installations without a direction-discriminator pin pass
/// `None::<&MockGpio>` (or any other `GpioInterface` type); every edge then
/// counts forward.
///
/// # Example (conceptual)
///
/// ```ignore
/// static DETECTOR: EdgeDetector = EdgeDetector::new();
///
/// #[embassy_executor::task]
/// async fn edge_task(mut pin: Input<'static>, pin2: PlatformGpio, timer: PlatformTimer) {
///     run_edge_task(&DETECTOR, &timer, Some(&pin2), || pin.wait_for_rising_edge()).await;
/// }
/// ```
pub async fn run_edge_task<T, G, F, Fut>(
    detector: &EdgeDetector,
    timer: &T,
    discriminator: Option<&G>,
    mut wait_for_edge: F,
) where
    T: TimerInterface,
    G: GpioInterface,
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        wait_for_edge().await;
        // Timestamp first, level second
        let now_us = timer.now_us() as u32;
        let forward = discriminator.map(|pin| pin.read()).unwrap_or(true);
        detector.on_edge(now_us, forward);
    }
}

/// Poll the meter at a fixed cadence
///
/// Each tick consumes whatever the detector accumulated and publishes the
/// outcome to the sink. Poll cadence affects only rate-update granularity,
/// never totals: delayed ticks simply see larger settled counts.
///
/// # Example (conceptual)
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn meter_task(mut meter: PulseMeter<'static>, timer: PlatformTimer, sink: MqttSink) {
///     meter.setup(&timer);
///     run_poll_task(&mut meter, &timer, &mut sink, Duration::from_millis(250)).await;
/// }
/// ```
pub async fn run_poll_task<T, S>(
    meter: &mut PulseMeter<'_>,
    timer: &T,
    sink: &mut S,
    poll_period: embassy_time::Duration,
) where
    T: TimerInterface,
    S: MeterSink,
{
    let mut ticker = embassy_time::Ticker::every(poll_period);
    loop {
        ticker.next().await;
        meter.poll(timer, sink);
    }
}
