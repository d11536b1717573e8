//! Engine metrics
//!
//! Atomic counters shared between worker-side reporters and the coordinator,
//! mirrored into the `metrics` facade for exporters.

use std::sync::atomic::{AtomicU64, Ordering};

use metrics::counter;

/// Counters for one run's progress traffic
#[derive(Debug, Default)]
pub struct EngineMetrics {
    /// Soft updates accepted into the channel
    soft_sent: AtomicU64,
    /// Soft updates dropped because the channel was full
    soft_dropped: AtomicU64,
    /// Stage-completion updates sent
    hard_sent: AtomicU64,
    /// Updates the reporter applied to the table
    applied: AtomicU64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn soft_sent(&self) -> u64 {
        self.soft_sent.load(Ordering::Relaxed)
    }

    pub fn inc_soft_sent(&self) {
        self.soft_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn soft_dropped(&self) -> u64 {
        self.soft_dropped.load(Ordering::Relaxed)
    }

    pub fn inc_soft_dropped(&self) {
        self.soft_dropped.fetch_add(1, Ordering::Relaxed);
        counter!("pixelforge_soft_updates_dropped_total").increment(1);
    }

    pub fn hard_sent(&self) -> u64 {
        self.hard_sent.load(Ordering::Relaxed)
    }

    pub fn inc_hard_sent(&self) {
        self.hard_sent.fetch_add(1, Ordering::Relaxed);
        counter!("pixelforge_stages_completed_total").increment(1);
    }

    pub fn applied(&self) -> u64 {
        self.applied.load(Ordering::Relaxed)
    }

    pub fn inc_applied(&self) {
        self.applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot of all counters
    pub fn snapshot(&self) -> EngineMetricsSnapshot {
        EngineMetricsSnapshot {
            soft_sent: self.soft_sent(),
            soft_dropped: self.soft_dropped(),
            hard_sent: self.hard_sent(),
            applied: self.applied(),
        }
    }
}

/// Point-in-time copy of [`EngineMetrics`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineMetricsSnapshot {
    pub soft_sent: u64,
    pub soft_dropped: u64,
    pub hard_sent: u64,
    pub applied: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let m = EngineMetrics::new();
        m.inc_soft_sent();
        m.inc_soft_sent();
        m.inc_soft_dropped();
        m.inc_hard_sent();
        m.inc_applied();

        let snap = m.snapshot();
        assert_eq!(snap.soft_sent, 2);
        assert_eq!(snap.soft_dropped, 1);
        assert_eq!(snap.hard_sent, 1);
        assert_eq!(snap.applied, 1);
    }
}
