#![cfg_attr(not(test), no_std)]

//! pulse_meter - Pulse rate measurement for utility meter outputs
//!
//! This library measures the rate and direction of pulses arriving on a
//! digital input (e.g. a utility meter's optical or reed-switch output) and
//! reports pulses-per-minute plus optional cumulative totals.
//!
//! An interrupt-context edge detector and a periodically-invoked poll routine
//! exchange counters through a double-buffered record pair, so no pulse is
//! ever dropped and the interrupt handler never waits on the poll side.

// Platform abstraction layer (pin and time sources are external collaborators)
pub mod platform;

// Sensor core: edge buffering, detection, rate estimation, state machine
pub mod meter;

// Unified log macros (defmt on embedded targets, println! in host tests)
pub mod logging;
