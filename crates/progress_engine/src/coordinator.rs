//! Run coordinator
//!
//! One `RunCoordinator` per run, consumed with it. Workers hold a
//! [`WorkerLink`] and mint one [`StageReporter`] per stage; the runner holds
//! the coordinator, opens the gate, and drains queued updates each poll tick.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, trace};

use contracts::{ProgressSink, ProgressUpdate, WorkerId};

use crate::gate::{GatePass, StartGate};
use crate::metrics::EngineMetrics;
use crate::table::{ApplyOutcome, ProgressTable};
use crate::UPDATE_QUEUE_DEPTH;

/// Reporter/runner side of a run
pub struct RunCoordinator {
    table: ProgressTable,
    updates_rx: mpsc::Receiver<ProgressUpdate>,
    gate: StartGate,
    completion_tx: watch::Sender<bool>,
    metrics: Arc<EngineMetrics>,
}

impl RunCoordinator {
    /// Build the coordinator and one [`WorkerLink`] per worker.
    ///
    /// The update channel is sized so that stage transitions rarely wait:
    /// `worker_count * UPDATE_QUEUE_DEPTH` slots, drained every poll tick.
    pub fn new(worker_count: usize, stage_count: usize) -> (Self, Vec<WorkerLink>) {
        let capacity = (worker_count * UPDATE_QUEUE_DEPTH).max(1);
        let (updates_tx, updates_rx) = mpsc::channel(capacity);
        let (gate, passes) = StartGate::new(worker_count);
        let (completion_tx, _) = watch::channel(false);
        let metrics = Arc::new(EngineMetrics::new());

        let links = passes
            .into_iter()
            .enumerate()
            .map(|(index, pass)| WorkerLink {
                worker: WorkerId(index),
                pass,
                updates_tx: updates_tx.clone(),
                metrics: Arc::clone(&metrics),
            })
            .collect();

        let coordinator = Self {
            table: ProgressTable::new(worker_count, stage_count),
            updates_rx,
            gate,
            completion_tx,
            metrics,
        };
        (coordinator, links)
    }

    /// The runner's rendezvous: wait for every worker, then release them all
    pub async fn rendezvous(&mut self) {
        self.gate.open().await;
        debug!(
            workers = self.table.worker_count(),
            stages = self.table.stage_count(),
            "all workers arrived, run started"
        );
    }

    /// Apply every queued update to the table.
    ///
    /// Non-blocking; the batch application between two polls is the
    /// consistent snapshot the display reads. Flips the completion signal
    /// when the last worker's last stage lands.
    pub fn drain(&mut self) {
        while let Ok(update) = self.updates_rx.try_recv() {
            trace!(
                worker = %update.worker,
                stage = update.stage,
                progress = update.progress,
                "applying progress update"
            );
            self.metrics.inc_applied();
            if self.table.apply(update) == ApplyOutcome::RunComplete {
                debug!("final stage completed, signalling run complete");
                self.completion_tx.send_replace(true);
            }
        }
    }

    /// Current table view; stable between drains
    pub fn table(&self) -> &ProgressTable {
        &self.table
    }

    /// True once every worker has completed every stage
    pub fn is_complete(&self) -> bool {
        self.table.is_complete()
    }

    /// Observable one-shot completion signal
    pub fn completion(&self) -> watch::Receiver<bool> {
        self.completion_tx.subscribe()
    }

    /// Shared traffic counters
    pub fn metrics(&self) -> Arc<EngineMetrics> {
        Arc::clone(&self.metrics)
    }
}

/// One worker's handle to the gate and the update channel
#[derive(Debug, Clone)]
pub struct WorkerLink {
    worker: WorkerId,
    pass: GatePass,
    updates_tx: mpsc::Sender<ProgressUpdate>,
    metrics: Arc<EngineMetrics>,
}

impl WorkerLink {
    pub fn worker(&self) -> WorkerId {
        self.worker
    }

    /// Rendezvous with every peer and the runner before stage 0
    pub async fn arrive(&mut self) {
        self.pass.arrive().await;
    }

    /// Reporter bound to one stage of this worker's pipeline
    pub fn stage_reporter(&self, stage: usize) -> StageReporter {
        StageReporter {
            worker: self.worker,
            stage,
            updates_tx: self.updates_tx.clone(),
            metrics: Arc::clone(&self.metrics),
            completed: false,
        }
    }
}

/// Per-stage progress sink handed to stage routines.
///
/// Soft updates (`progress < 1.0`) are best-effort: a full channel drops them
/// so the worker never blocks on cosmetics. The terminal update is mandatory
/// and blocks until the reporter frees capacity - callers must be on a
/// blocking thread, which is where stage routines run.
#[derive(Debug)]
pub struct StageReporter {
    worker: WorkerId,
    stage: usize,
    updates_tx: mpsc::Sender<ProgressUpdate>,
    metrics: Arc<EngineMetrics>,
    completed: bool,
}

impl StageReporter {
    fn update(&self, progress: f32) -> ProgressUpdate {
        ProgressUpdate {
            worker: self.worker,
            stage: self.stage,
            progress,
        }
    }
}

impl ProgressSink for StageReporter {
    fn report(&mut self, progress: f32) -> bool {
        if progress < 1.0 {
            match self.updates_tx.try_send(self.update(progress)) {
                Ok(()) => self.metrics.inc_soft_sent(),
                Err(mpsc::error::TrySendError::Full(_)) => self.metrics.inc_soft_dropped(),
                // Reporter gone: the run is being torn down.
                Err(mpsc::error::TrySendError::Closed(_)) => return false,
            }
            return true;
        }

        // Stage routines promise a single terminal report; a second one
        // would double-advance the slot.
        debug_assert!(!self.completed, "terminal progress reported twice");
        if !self.completed {
            self.completed = true;
            self.metrics.inc_hard_sent();
            let _ = self.updates_tx.blocking_send(self.update(1.0));
        }
        false
    }
}
