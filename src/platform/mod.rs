//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the two collaborators the
//! meter core needs from its environment: a digital input pin (the direction
//! discriminator) and a monotonic microsecond time source. Pin bring-up and
//! interrupt registration stay with platform-specific code outside this crate.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{GpioInterface, GpioMode, TimerInterface};
