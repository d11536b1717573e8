//! # Progress Engine
//!
//! Run-scoped coordination between N pipeline workers and one polling
//! reporter. The engine owns three pieces of machinery:
//!
//! - a [`StartGate`] that holds every worker at the line until all of them
//!   (and the reporter) are ready, so the first poll never sees a
//!   half-populated table;
//! - a bounded update channel: fractional ("soft") updates are pushed with
//!   `try_send` and silently dropped under pressure, stage-completion
//!   ("hard") updates block until accepted - workers never stall on
//!   cosmetics and never lose a stage transition;
//! - a [`ProgressTable`] the reporter drains queued updates into each poll
//!   tick; the batch drain is the consistent snapshot, and applying the last
//!   worker's last hard update flips the one-shot completion signal.
//!
//! ```text
//! Worker 0 ──┐  try_send / blocking_send   ┌────────────────┐    drain()
//! Worker 1 ──┼────────── mpsc ────────────▶│ RunCoordinator │◀─────────── Reporter
//! Worker N ──┘                             │  ProgressTable │  completion()
//!                                          └────────────────┘
//! ```
//!
//! Everything here is constructed fresh per run and consumed with it; there
//! is no process-wide state to reset between runs.

mod coordinator;
mod gate;
mod metrics;
mod table;

pub use coordinator::{RunCoordinator, StageReporter, WorkerLink};
pub use gate::{GatePass, StartGate};
pub use metrics::{EngineMetrics, EngineMetricsSnapshot};
pub use table::{ApplyOutcome, ProgressSlot, ProgressTable};

/// Reporter poll cadence
pub const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(20);

/// Queued updates per worker before soft updates start dropping
pub const UPDATE_QUEUE_DEPTH: usize = 16;
