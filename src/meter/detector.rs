//! Interrupt-context edge detection and classification
//!
//! The detector runs on every rising edge of the pulse input. It classifies
//! the edge as forward or reverse from the discriminator pin's instantaneous
//! level and updates the active record of the shared [`EdgeBuffer`].
//!
//! The handler is O(1), allocation-free, and never blocks: its only side
//! effects are the active record and the remembered direction flag.

use core::sync::atomic::{AtomicBool, Ordering};

use super::buffer::{EdgeBuffer, EdgeRecord};

/// Interrupt-side edge detector
///
/// Owns the counter exchange and the direction flag. Construct one as a
/// `static` and hand a reference both to the interrupt registration and to
/// the [`PulseMeter`](super::sensor::PulseMeter) driver:
///
/// ```ignore
/// static DETECTOR: EdgeDetector = EdgeDetector::new();
///
/// // in the edge interrupt handler / edge event task:
/// DETECTOR.on_edge(now_us, discriminator_pin.read());
///
/// // in setup:
/// let mut meter = PulseMeter::new(&DETECTOR, PulseMeterConfig::default());
/// ```
pub struct EdgeDetector {
    edges: EdgeBuffer,
    /// Last observed discriminator level; matching levels count, a level
    /// change is a direction marker and is not counted. Written and read
    /// only from the interrupt context.
    forward: AtomicBool,
}

impl EdgeDetector {
    /// Create a new detector assuming forward direction
    ///
    /// This is a const fn, allowing static initialization.
    pub const fn new() -> Self {
        Self {
            edges: EdgeBuffer::new(),
            forward: AtomicBool::new(true),
        }
    }

    /// Record one edge of the pulse input (interrupt context)
    ///
    /// `now_us` must be captured before any other work in the handler so the
    /// timestamp reflects the true edge time regardless of branch latency.
    /// `discriminator_forward` is the discriminator pin's instantaneous
    /// level; installations without a discriminator pin pass `true` so every
    /// edge counts forward.
    ///
    /// An edge whose discriminator level differs from the remembered flag is
    /// a direction-change marker: the flag is updated and no counter is
    /// incremented. The edge timestamp is recorded unconditionally.
    pub fn on_edge(&self, now_us: u32, discriminator_forward: bool) {
        let remembered = self.forward.load(Ordering::Relaxed);

        if discriminator_forward == remembered {
            self.edges.with_active(|rec| {
                if discriminator_forward {
                    rec.forward = rec.forward.wrapping_add(1);
                } else {
                    rec.reverse = rec.reverse.wrapping_add(1);
                }
                rec.last_edge_us = now_us;
            });
        } else {
            self.forward.store(discriminator_forward, Ordering::Relaxed);
            self.edges.with_active(|rec| rec.last_edge_us = now_us);
        }
    }

    /// Exchange buffer roles and consume the settled record (poll context)
    pub fn reset_and_rotate(&self) -> EdgeRecord {
        self.edges.reset_and_rotate()
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}
