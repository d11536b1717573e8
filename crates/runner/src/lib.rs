//! # Runner
//!
//! Orchestrates one pipeline run: derives the worker count from the leading
//! stage, prepares each worker's buffer, spawns the workers, rendezvous with
//! them through the progress engine's gate, then polls - drain, render,
//! check completion, sleep - until the run-complete signal fires, and joins
//! every worker before returning a [`RunReport`].

mod orchestrator;
mod report;
mod view;
mod worker;

pub use orchestrator::run_pipeline;
pub use report::RunReport;
pub use view::{NullView, ProgressView};
