//! Report cadence
//!
//! Stage routines walk pixels in row-major order; the ticker turns a pixel
//! index into sparse soft reports so the sink sees ~100 updates per stage
//! regardless of image size.

use contracts::ProgressSink;

use crate::REPORT_STEP;

pub(crate) struct ProgressTicker {
    total: usize,
    last_report: usize,
}

impl ProgressTicker {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            total,
            last_report: 0,
        }
    }

    /// Maybe report progress for the pixel at `index`.
    ///
    /// Returns the sink's continuation flag, or `true` when no report was
    /// due. Never reports 1.0 - the routine does that once, at the end.
    pub(crate) fn tick(&mut self, index: usize, sink: &mut dyn ProgressSink) -> bool {
        if self.total == 0 {
            return true;
        }
        if (index - self.last_report) as f32 / self.total as f32 >= REPORT_STEP {
            self.last_report = index;
            return sink.report(index as f32 / self.total as f32);
        }
        true
    }
}
