//! Double-buffered edge counter exchange
//!
//! Two counter records are shared between the interrupt-context edge detector
//! and the poll routine. At any instant exactly one record is "active"
//! (detector-writable) and one is "settled" (poll-readable); the roles swap
//! once per poll tick with a single atomic index store. No lock is held on
//! the interrupt side, so the detector never waits on the poll routine.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Edge counters accumulated between two poll ticks
///
/// Timestamps are microseconds in the platform's native wrapping 32-bit
/// width; consumers must subtract with `wrapping_sub` so counter wraparound
/// self-corrects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeRecord {
    /// Timestamp of the most recent edge, in microseconds
    pub last_edge_us: u32,
    /// Number of forward-classified edges since the last exchange
    pub forward: u32,
    /// Number of reverse-classified edges since the last exchange
    pub reverse: u32,
}

impl EdgeRecord {
    /// Create an empty record
    pub const fn new() -> Self {
        Self {
            last_edge_us: 0,
            forward: 0,
            reverse: 0,
        }
    }

    /// Whether any edge was recorded since the last exchange
    pub fn has_edges(&self) -> bool {
        self.forward > 0 || self.reverse > 0
    }

    fn clear_counts(&mut self) {
        self.forward = 0;
        self.reverse = 0;
    }
}

/// Two-slot counter exchange between interrupt and poll context
///
/// The raw slots are never exposed: the interrupt side mutates the active
/// record through [`EdgeBuffer::with_active`], and the poll side consumes the
/// settled record through [`EdgeBuffer::reset_and_rotate`]. No caller can
/// read a slot currently being written.
///
/// # Safety Invariants
///
/// - `with_active` may only be called from the interrupt context (or from a
///   single test thread standing in for it)
/// - `reset_and_rotate` may only be called from the poll context
/// - The interrupt context preempts the poll context but always runs to
///   completion before the poll context resumes
pub struct EdgeBuffer {
    slots: [UnsafeCell<EdgeRecord>; 2],
    active: AtomicUsize,
}

// Safety: the slot written through each UnsafeCell is selected by `active`,
// which is only ever stored by the poll context inside a critical section.
// The interrupt context writes slots[active] and the poll context touches
// slots[1 - active] only, so the two contexts never alias a slot mutably.
unsafe impl Sync for EdgeBuffer {}

impl EdgeBuffer {
    /// Create a new buffer with both records empty
    ///
    /// This is a const fn, allowing static initialization.
    pub const fn new() -> Self {
        Self {
            slots: [
                UnsafeCell::new(EdgeRecord::new()),
                UnsafeCell::new(EdgeRecord::new()),
            ],
            active: AtomicUsize::new(0),
        }
    }

    /// Mutate the currently active record (interrupt context)
    ///
    /// O(1), allocation-free, and wait-free: a single atomic load selects the
    /// slot, then the closure runs on it directly.
    pub fn with_active<R>(&self, f: impl FnOnce(&mut EdgeRecord) -> R) -> R {
        let idx = self.active.load(Ordering::Acquire);
        // Safety: the poll context never touches the slot `active` points at,
        // and the index cannot change underneath us because the role exchange
        // happens inside a critical section (see `reset_and_rotate`).
        unsafe { f(&mut *self.slots[idx].get()) }
    }

    /// Exchange buffer roles and return the newly settled record (poll context)
    ///
    /// The counts of the record about to become active are cleared strictly
    /// before the exchange, so the detector never accumulates into stale
    /// counts from two cycles ago. Its timestamp is deliberately left in
    /// place; the detector overwrites it on the next edge.
    pub fn reset_and_rotate(&self) -> EdgeRecord {
        let next_active = self.active.load(Ordering::Relaxed) ^ 1;

        // Safety: this slot is currently settled, so the interrupt context
        // does not write it. We still own it exclusively here.
        unsafe {
            (*self.slots[next_active].get()).clear_counts();
        }

        // The exchange itself must be observable-atomic from the detector's
        // perspective: the critical section keeps an edge interrupt from
        // landing between the role store and the settled snapshot.
        critical_section::with(|_cs| {
            self.active.store(next_active, Ordering::Release);
            // Safety: the slot we just retired is now settled; the interrupt
            // context writes the other slot from here on.
            unsafe { *self.slots[next_active ^ 1].get() }
        })
    }

    /// Read the settled record without exchanging roles (poll context)
    pub fn read_settled(&self) -> EdgeRecord {
        let settled = self.active.load(Ordering::Relaxed) ^ 1;
        // Safety: the interrupt context never writes the settled slot.
        unsafe { *self.slots[settled].get() }
    }
}

impl Default for EdgeBuffer {
    fn default() -> Self {
        Self::new()
    }
}
