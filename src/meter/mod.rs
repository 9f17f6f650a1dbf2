//! Pulse rate measurement core
//!
//! Measures pulses-per-minute and cumulative totals from a digital input,
//! with an optional second input discriminating forward from reverse flow.
//!
//! # Architecture
//!
//! ```text
//! interrupt context                      poll context
//! ┌──────────────┐   ┌──────────────┐   ┌───────────────────────────┐
//! │ EdgeDetector ├──►│  EdgeBuffer  ├──►│ PulseMeter                │
//! │ (classify,   │   │ (two slots,  │   │  RateEstimator → rate     │
//! │  timestamp)  │   │  role swap)  │   │  MeterStateMachine → when │
//! └──────────────┘   └──────────────┘   │  totals → MeterSink       │
//!                                       └───────────────────────────┘
//! ```
//!
//! The detector writes only the active buffer slot and never blocks; the
//! poll routine swaps the slot roles once per tick and consumes the settled
//! slot. Pulses are never dropped, regardless of poll cadence.

pub mod buffer;
pub mod config;
pub mod detector;
pub mod rate;
pub mod sensor;
pub mod sink;
pub mod state;

#[cfg(feature = "embassy")]
pub mod task;

// Core exports
pub use buffer::{EdgeBuffer, EdgeRecord};
pub use config::{PulseMeterConfig, DEFAULT_TIMEOUT_US};
pub use detector::EdgeDetector;
pub use rate::RateEstimator;
pub use sensor::PulseMeter;
pub use sink::MeterSink;
pub use state::{MeterState, MeterStateMachine, TickDecision};

#[cfg(any(test, feature = "mock"))]
pub use sink::RecordingSink;

#[cfg(feature = "embassy")]
pub use task::{run_edge_task, run_poll_task};
