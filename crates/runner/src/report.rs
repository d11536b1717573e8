//! Run statistics

use std::time::Duration;

/// Statistics from one pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Number of workers (output images)
    pub workers: usize,

    /// Stages per worker
    pub stages: usize,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// Progress updates the reporter applied to the table
    pub updates_applied: u64,

    /// Soft updates dropped under channel pressure
    pub soft_updates_dropped: u64,

    /// Stage completions (always `workers * stages` for a finished run)
    pub stages_completed: u64,
}

impl RunReport {
    /// Stage completions per second
    pub fn stages_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.stages_completed as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Share of soft updates that were dropped, as a percentage
    pub fn drop_rate(&self) -> f64 {
        let total = self.updates_applied + self.soft_updates_dropped;
        if total > 0 {
            (self.soft_updates_dropped as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Run Statistics ===\n");
        println!("   ├─ Workers: {}", self.workers);
        println!("   ├─ Stages per worker: {}", self.stages);
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Stages completed: {}", self.stages_completed);
        println!("   ├─ Stages/s: {:.2}", self.stages_per_second());
        println!("   ├─ Updates applied: {}", self.updates_applied);
        println!(
            "   └─ Soft updates dropped: {} ({:.2}%)",
            self.soft_updates_dropped,
            self.drop_rate()
        );
        println!();
    }
}
