//! Progress reporting contract
//!
//! Defines the callback seam between stage routines and the progress engine.
//! The worker and stage bindings are captured inside the sink instance the
//! engine hands to each stage call, so routines only report a fraction.

use serde::{Deserialize, Serialize};

use crate::WorkerId;

/// Progress callback given to every stage routine.
///
/// # Contract obligations on the caller (the stage routine)
///
/// 1. Invoke `report` zero or more times with strictly increasing progress in
///    (0, 1), then exactly once with `1.0` before returning.
/// 2. Never report `1.0` more than once per stage.
/// 3. Never block indefinitely without eventually reaching `1.0`.
///
/// The returned flag is advisory: `false` means the receiver no longer needs
/// updates for this stage, and the routine may stop reporting. It does not
/// gate delivery and must not be treated as a cancellation order.
pub trait ProgressSink {
    fn report(&mut self, progress: f32) -> bool;
}

/// Blanket impl so plain closures can serve as sinks in tests and adapters
impl<F> ProgressSink for F
where
    F: FnMut(f32) -> bool,
{
    fn report(&mut self, progress: f32) -> bool {
        self(progress)
    }
}

/// One progress message pushed from a worker to the reporter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Reporting worker
    pub worker: WorkerId,
    /// Stage index within the pipeline
    pub stage: usize,
    /// Fraction in [0, 1]; exactly 1.0 marks the stage complete
    pub progress: f32,
}

impl ProgressUpdate {
    /// Stage-completion updates must never be dropped
    pub fn is_terminal(&self) -> bool {
        self.progress >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_sink() {
        let mut seen = Vec::new();
        let mut sink = |p: f32| {
            seen.push(p);
            true
        };
        assert!(ProgressSink::report(&mut sink, 0.5));
        assert_eq!(seen, vec![0.5]);
    }

    #[test]
    fn test_terminal_detection() {
        let soft = ProgressUpdate {
            worker: WorkerId(0),
            stage: 0,
            progress: 0.99,
        };
        let hard = ProgressUpdate {
            worker: WorkerId(0),
            stage: 0,
            progress: 1.0,
        };
        assert!(!soft.is_terminal());
        assert!(hard.is_terminal());
    }
}
