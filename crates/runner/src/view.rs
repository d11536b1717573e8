//! Display seam
//!
//! The runner renders through this trait once per poll tick, right after the
//! drain, so every view sees a consistent cut of the table. Rendering itself
//! lives with the caller (the CLI draws terminal bars; tests collect
//! snapshots).

use progress_engine::ProgressTable;

/// Consumer of per-poll progress snapshots
pub trait ProgressView {
    fn render(&mut self, table: &ProgressTable);
}

/// View that discards every snapshot; used by quiet runs and tests
#[derive(Debug, Default)]
pub struct NullView;

impl ProgressView for NullView {
    fn render(&mut self, _table: &ProgressTable) {}
}
