//! Mock GPIO implementation for testing

use crate::platform::{
    Result,
    traits::{GpioInterface, GpioMode},
};

/// Mock GPIO input implementation
///
/// Tracks pin state (high/low) and mode for test verification. Tests drive
/// the simulated level with [`MockGpio::set_input_state`].
#[derive(Debug)]
pub struct MockGpio {
    state: bool,
    mode: GpioMode,
}

impl MockGpio {
    /// Create a new mock GPIO in plain input mode, reading low
    pub fn new_input() -> Self {
        Self {
            state: false,
            mode: GpioMode::Input,
        }
    }

    /// Create a new mock GPIO reading the given level
    pub fn with_state(high: bool) -> Self {
        Self {
            state: high,
            mode: GpioMode::Input,
        }
    }

    /// Set the input state (for simulating external signal changes)
    pub fn set_input_state(&mut self, high: bool) {
        self.state = high;
    }
}

impl GpioInterface for MockGpio {
    fn read(&self) -> bool {
        self.state
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        self.mode = mode;
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}
