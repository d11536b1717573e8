//! Progress table
//!
//! Per-worker, per-stage completion fractions, owned by the reporter and fed
//! by the coordinator's drain. Slot invariants:
//!
//! - `current_stage` only advances, one stage per terminal update;
//! - entries behind `current_stage` are frozen at 1.0;
//! - entries at or past `current_stage` hold the latest fraction seen.

use contracts::{ProgressUpdate, WorkerId};

/// Per-worker progress record
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSlot {
    current_stage: usize,
    stages: Vec<f32>,
}

impl ProgressSlot {
    fn new(stage_count: usize) -> Self {
        Self {
            current_stage: 0,
            stages: vec![0.0; stage_count],
        }
    }

    /// Index of the stage currently in progress; equals the stage count once
    /// the worker has finished
    pub fn current_stage(&self) -> usize {
        self.current_stage
    }

    /// Per-stage fractions in [0, 1]
    pub fn stages(&self) -> &[f32] {
        &self.stages
    }

    /// Whether every stage has completed
    pub fn is_finished(&self) -> bool {
        self.current_stage == self.stages.len()
    }

    /// Mean completion across stages, for display
    pub fn overall(&self) -> f32 {
        if self.stages.is_empty() {
            return 1.0;
        }
        self.stages.iter().sum::<f32>() / self.stages.len() as f32
    }
}

/// What applying one update did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Fractional progress recorded
    Recorded,
    /// Update referred to an already-frozen stage or unknown worker; ignored
    Stale,
    /// A stage completed
    StageComplete,
    /// The worker's final stage completed
    WorkerFinished,
    /// The last worker finished: the run is complete
    RunComplete,
}

/// All workers' progress for one run
#[derive(Debug, Clone)]
pub struct ProgressTable {
    stage_count: usize,
    slots: Vec<ProgressSlot>,
    finished_workers: usize,
    complete: bool,
}

impl ProgressTable {
    /// Pre-allocate zeroed slots for every worker.
    ///
    /// Built before any worker is spawned, so no poll can observe a partially
    /// populated table.
    pub fn new(worker_count: usize, stage_count: usize) -> Self {
        Self {
            stage_count,
            slots: vec![ProgressSlot::new(stage_count); worker_count],
            finished_workers: 0,
            complete: false,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.slots.len()
    }

    pub fn stage_count(&self) -> usize {
        self.stage_count
    }

    pub fn slots(&self) -> &[ProgressSlot] {
        &self.slots
    }

    /// One worker's slot
    pub fn slot(&self, worker: WorkerId) -> Option<&ProgressSlot> {
        self.slots.get(worker.index())
    }

    /// Workers that have completed every stage
    pub fn finished_workers(&self) -> usize {
        self.finished_workers
    }

    /// True once every worker has finished; flips exactly once
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Apply one drained update.
    ///
    /// Updates arrive per-worker in send order (the channel is FIFO), so a
    /// terminal update is always the last one seen for its stage. Stale
    /// updates - a slow soft report for a stage that already froze - are
    /// dropped without touching the slot.
    pub fn apply(&mut self, update: ProgressUpdate) -> ApplyOutcome {
        let stage_count = self.stage_count;
        let Some(slot) = self.slots.get_mut(update.worker.index()) else {
            return ApplyOutcome::Stale;
        };
        if update.stage != slot.current_stage || update.stage >= stage_count {
            return ApplyOutcome::Stale;
        }

        if !update.is_terminal() {
            slot.stages[update.stage] = update.progress.clamp(0.0, 1.0);
            return ApplyOutcome::Recorded;
        }

        slot.stages[update.stage] = 1.0;
        slot.current_stage += 1;
        if !slot.is_finished() {
            return ApplyOutcome::StageComplete;
        }

        self.finished_workers += 1;
        if self.finished_workers == self.slots.len() && !self.complete {
            self.complete = true;
            return ApplyOutcome::RunComplete;
        }
        ApplyOutcome::WorkerFinished
    }

    /// Owned copy of every worker's per-stage fractions, for display
    pub fn snapshot(&self) -> Vec<Vec<f32>> {
        self.slots.iter().map(|s| s.stages.clone()).collect()
    }
}
