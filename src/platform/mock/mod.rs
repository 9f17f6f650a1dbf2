//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be
//! used for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use pulse_meter::platform::mock::{MockGpio, MockTimer};
//! use pulse_meter::platform::traits::{GpioInterface, TimerInterface};
//!
//! let mut pin = MockGpio::new_input();
//! pin.set_input_state(true);
//! assert!(pin.read());
//!
//! let mut timer = MockTimer::new();
//! timer.advance_us(500_000);
//! assert_eq!(timer.now_us(), 500_000);
//! ```

#![cfg(any(test, feature = "mock"))]

mod gpio;
mod timer;

pub use gpio::MockGpio;
pub use timer::MockTimer;
