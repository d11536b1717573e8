//! Startup rendezvous
//!
//! A counting wait-group: each worker signals ready once and then waits for a
//! single go broadcast; the runner collects exactly `worker_count` ready
//! signals before opening. The open returns to the runner only after every
//! worker has arrived, which gives the ordering guarantee the reporter needs:
//! no worker starts stage 0 before all peers are registered and the runner is
//! about to poll.

use tokio::sync::{mpsc, watch};
use tracing::trace;

/// Runner half of the rendezvous
pub struct StartGate {
    worker_count: usize,
    ready_rx: mpsc::Receiver<()>,
    start_tx: watch::Sender<bool>,
}

/// Worker half of the rendezvous, one per worker
#[derive(Debug, Clone)]
pub struct GatePass {
    ready_tx: mpsc::Sender<()>,
    start_rx: watch::Receiver<bool>,
}

impl StartGate {
    /// Create a gate for `worker_count` workers plus the runner
    pub fn new(worker_count: usize) -> (Self, Vec<GatePass>) {
        // Ready capacity covers every worker, so arrivals never block on it.
        let (ready_tx, ready_rx) = mpsc::channel(worker_count.max(1));
        let (start_tx, start_rx) = watch::channel(false);

        let passes = (0..worker_count)
            .map(|_| GatePass {
                ready_tx: ready_tx.clone(),
                start_rx: start_rx.clone(),
            })
            .collect();

        let gate = Self {
            worker_count,
            ready_rx,
            start_tx,
        };
        (gate, passes)
    }

    /// Wait for every worker to arrive, then release all of them.
    ///
    /// Returns once all `worker_count` ready signals have been collected and
    /// the go broadcast is out. If a worker's pass is dropped before it
    /// arrives, the missing signal is treated as an arrival so the runner is
    /// not left waiting on a dead task.
    pub async fn open(&mut self) {
        let mut arrived = 0;
        while arrived < self.worker_count {
            match self.ready_rx.recv().await {
                Some(()) => {
                    arrived += 1;
                    trace!(arrived, total = self.worker_count, "worker arrived at gate");
                }
                // All passes dropped: nothing left to wait for.
                None => break,
            }
        }
        self.start_tx.send_replace(true);
    }
}

impl GatePass {
    /// Signal ready and wait for the go broadcast
    pub async fn arrive(&mut self) {
        // The runner only opens after collecting every signal, so a send
        // failure here means the run was torn down; waiting is pointless.
        if self.ready_tx.send(()).await.is_err() {
            return;
        }
        while !*self.start_rx.borrow_and_update() {
            if self.start_rx.changed().await.is_err() {
                return;
            }
        }
    }
}
