//! GPIO input interface trait
//!
//! This module defines the digital input interface the meter uses to sample
//! the direction-discriminator pin. The pulse pin itself is consumed by the
//! platform's edge/interrupt abstraction and never read as a level here.

use crate::platform::Result;

/// GPIO input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioMode {
    /// Input mode (high impedance)
    Input,
    /// Input mode with pull-up resistor
    InputPullUp,
    /// Input mode with pull-down resistor
    InputPullDown,
}

/// GPIO input interface trait
///
/// Platform implementations must provide this interface for digital inputs.
///
/// # Safety Invariants
///
/// - GPIO pin must be initialized before use
/// - Only one owner per GPIO pin instance
/// - `read` must be callable from interrupt context without blocking
pub trait GpioInterface {
    /// Read GPIO pin state
    ///
    /// Returns `true` if the pin is high, `false` if low.
    fn read(&self) -> bool;

    /// Set GPIO pin mode
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio` if the mode cannot be set.
    fn set_mode(&mut self, mode: GpioMode) -> Result<()>;

    /// Get current GPIO pin mode
    fn mode(&self) -> GpioMode;
}
