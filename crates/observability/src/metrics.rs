//! Run metrics collection
//!
//! Records per-run and per-stage metrics through the `metrics` facade, and
//! aggregates run summaries in memory for end-of-session statistics.

use metrics::{counter, gauge, histogram};

/// Record one completed pipeline run
///
/// Call once per run, after the workers have been joined.
pub fn record_run(duration_secs: f64, workers: usize, stages: usize, soft_dropped: u64) {
    counter!("pixelforge_runs_total").increment(1);
    gauge!("pixelforge_last_run_workers").set(workers as f64);
    histogram!("pixelforge_run_duration_seconds").record(duration_secs);
    histogram!("pixelforge_run_stage_count").record(stages as f64);

    if soft_dropped > 0 {
        counter!("pixelforge_soft_updates_dropped_runs_total").increment(1);
    }
}

/// Record one stage completion with its command name
pub fn record_stage(command: &str) {
    counter!(
        "pixelforge_stage_runs_total",
        "command" => command.to_string()
    )
    .increment(1);
}

/// Streaming mean/min/max without storing samples
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn update(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl std::fmt::Display for RunningStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mean={:.2} min={:.2} max={:.2} (n={})",
            self.mean(),
            self.min,
            self.max,
            self.count
        )
    }
}

/// In-memory aggregation across a session's runs
#[derive(Debug, Clone, Default)]
pub struct RunMetricsAggregator {
    runs: u64,
    workers: RunningStats,
    duration_secs: RunningStats,
    soft_dropped_total: u64,
}

impl RunMetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one run's numbers into the aggregate
    pub fn update(&mut self, duration_secs: f64, workers: usize, soft_dropped: u64) {
        self.runs += 1;
        self.workers.update(workers as f64);
        self.duration_secs.update(duration_secs);
        self.soft_dropped_total += soft_dropped;
    }

    /// Summary snapshot
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            runs: self.runs,
            mean_workers: self.workers.mean(),
            mean_duration_secs: self.duration_secs.mean(),
            max_duration_secs: self.duration_secs.max(),
            soft_dropped_total: self.soft_dropped_total,
        }
    }
}

/// Aggregated session statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub runs: u64,
    pub mean_workers: f64,
    pub mean_duration_secs: f64,
    pub max_duration_secs: f64,
    pub soft_dropped_total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_stats_tracks_extremes() {
        let mut stats = RunningStats::default();
        stats.update(3.0);
        stats.update(1.0);
        stats.update(2.0);
        assert_eq!(stats.count(), 3);
        assert_eq!(stats.min(), 1.0);
        assert_eq!(stats.max(), 3.0);
        assert!((stats.mean() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_stats_are_zero() {
        let stats = RunningStats::default();
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.count(), 0);
    }

    #[test]
    fn test_aggregator_accumulates_runs() {
        let mut agg = RunMetricsAggregator::new();
        agg.update(1.0, 2, 5);
        agg.update(3.0, 4, 0);

        let summary = agg.summary();
        assert_eq!(summary.runs, 2);
        assert!((summary.mean_workers - 3.0).abs() < 1e-12);
        assert!((summary.mean_duration_secs - 2.0).abs() < 1e-12);
        assert_eq!(summary.max_duration_secs, 3.0);
        assert_eq!(summary.soft_dropped_total, 5);
    }
}
