//! Meter lifecycle state machine
//!
//! Tracks the INITIAL → RUNNING → TIMED_OUT lifecycle and decides, once per
//! poll tick, whether to establish a baseline, publish a computed rate,
//! publish a one-shot zero on timeout, or do nothing.

/// Meter lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeterState {
    /// No edge processed yet since setup
    Initial,
    /// At least one edge processed; rates are published
    Running,
    /// No edge for longer than the configured timeout; zero was published
    TimedOut,
}

/// Outcome of one poll tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickDecision {
    /// First edge after Initial or TimedOut: record the baseline timestamp,
    /// publish nothing (a valid pulse width needs two processed edges)
    Baseline,
    /// Running with fresh edges: compute and publish a rate
    PublishRate,
    /// Idle time exceeded the timeout: publish zero exactly once
    ReportTimeout,
    /// Nothing to report this tick
    Idle,
}

/// Per-tick state transition logic
///
/// Transition table (evaluated once per poll tick):
///
/// | Current  | Edges? | Idle vs timeout | Next     | Decision      |
/// |----------|--------|-----------------|----------|---------------|
/// | Initial  | yes    | -               | Running  | Baseline      |
/// | Running  | yes    | -               | Running  | PublishRate   |
/// | TimedOut | yes    | -               | Running  | Baseline      |
/// | Initial  | no     | idle <= timeout | Initial  | Idle          |
/// | Initial  | no     | idle > timeout  | TimedOut | ReportTimeout |
/// | Running  | no     | idle <= timeout | Running  | Idle          |
/// | Running  | no     | idle > timeout  | TimedOut | ReportTimeout |
/// | TimedOut | no     | -               | TimedOut | Idle          |
#[derive(Debug, Clone, Copy)]
pub struct MeterStateMachine {
    state: MeterState,
}

impl MeterStateMachine {
    /// Create a state machine in the Initial state
    pub const fn new() -> Self {
        Self {
            state: MeterState::Initial,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> MeterState {
        self.state
    }

    /// Advance by one poll tick
    ///
    /// `edges_seen` is whether the settled record carried any edge; `idle_us`
    /// is the wraparound-safe time since the last processed edge and is only
    /// consulted on no-edge ticks.
    pub fn tick(&mut self, edges_seen: bool, idle_us: u32, timeout_us: u32) -> TickDecision {
        match (self.state, edges_seen) {
            (MeterState::Initial, true) | (MeterState::TimedOut, true) => {
                self.state = MeterState::Running;
                TickDecision::Baseline
            }
            (MeterState::Running, true) => TickDecision::PublishRate,
            (MeterState::Initial, false) | (MeterState::Running, false) => {
                if idle_us > timeout_us {
                    self.state = MeterState::TimedOut;
                    TickDecision::ReportTimeout
                } else {
                    TickDecision::Idle
                }
            }
            // Already timed out: zero was published once, stay silent
            (MeterState::TimedOut, false) => TickDecision::Idle,
        }
    }
}

impl Default for MeterStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
