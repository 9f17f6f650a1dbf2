//! Timer interface trait
//!
//! This module defines the monotonic time source that platform
//! implementations must provide.

/// Timer interface trait
///
/// Platform implementations must provide this interface for timestamping.
///
/// # Safety Invariants
///
/// - Timer peripheral must be initialized before use
/// - Microsecond-level precision required
/// - Monotonic time source (never goes backwards)
pub trait TimerInterface {
    /// Get current time in microseconds
    ///
    /// Returns a monotonic timestamp in microseconds since platform
    /// initialization.
    ///
    /// # Note
    ///
    /// The meter core performs all timestamp arithmetic in the truncated
    /// 32-bit width with wrapping subtraction, so 32-bit hardware counters
    /// that wrap after about 71 minutes are fine as a backing source.
    fn now_us(&self) -> u64;

    /// Get current time in milliseconds
    ///
    /// Returns a monotonic timestamp in milliseconds since platform
    /// initialization.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
