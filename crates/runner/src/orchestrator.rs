//! Run orchestration
//!
//! The invoking task is also the reporter: after spawning the workers it
//! rendezvous with them once, then owns the poll loop until the progress
//! engine signals completion.

use std::sync::Arc;
use std::time::Instant;

use tokio::time::sleep;
use tracing::{error, info};

use contracts::{PipelineError, PipelineSpec, StageSpec, TextureBuffer};
use progress_engine::{RunCoordinator, POLL_INTERVAL};

use crate::report::RunReport;
use crate::view::ProgressView;
use crate::worker::WorkerTask;

/// Run one validated pipeline to completion.
///
/// Resolves the worker count, prepares each worker's buffer, spawns the
/// workers, and polls the progress engine on a fixed cadence - rendering
/// through `view` after every drain - until the run-complete signal fires.
/// All workers are joined before this returns.
///
/// # Errors
///
/// - [`PipelineError::InvalidLeadingStage`] when the leading stage is not a
///   generator/input kind (unreachable for parser-produced specs);
/// - [`PipelineError::ImageDecode`] when an input image fails to decode.
///
/// Errors abort only this run; the process (the interactive shell) survives.
pub async fn run_pipeline(
    spec: PipelineSpec,
    view: &mut dyn ProgressView,
) -> Result<RunReport, PipelineError> {
    let started = Instant::now();

    let Some(worker_count) = spec.worker_count() else {
        return Err(PipelineError::InvalidLeadingStage {
            stage: spec.leading_kind().to_string(),
        });
    };
    let stage_count = spec.stage_count();

    info!(
        workers = worker_count,
        stages = stage_count,
        leading = %spec.leading_kind(),
        "starting pipeline run"
    );

    // Decode inputs before anything is spawned: a bad file aborts the run
    // cleanly instead of leaving the gate waiting on a dead worker.
    let buffers = prepare_buffers(&spec)?;

    let (mut coordinator, links) = RunCoordinator::new(worker_count, stage_count);
    let spec = Arc::new(spec);

    let handles: Vec<_> = links
        .into_iter()
        .zip(buffers)
        .map(|(link, buffer)| {
            WorkerTask {
                link,
                buffer,
                spec: Arc::clone(&spec),
            }
            .spawn()
        })
        .collect();

    coordinator.rendezvous().await;

    let mut completion = coordinator.completion();
    loop {
        coordinator.drain();
        view.render(coordinator.table());
        if *completion.borrow_and_update() {
            break;
        }
        sleep(POLL_INTERVAL).await;
    }

    for (index, handle) in handles.into_iter().enumerate() {
        if let Err(e) = handle.await {
            error!(worker = index, error = ?e, "worker task failed to join");
        }
    }

    let engine = coordinator.metrics().snapshot();
    let report = RunReport {
        workers: worker_count,
        stages: stage_count,
        duration: started.elapsed(),
        updates_applied: engine.applied,
        soft_updates_dropped: engine.soft_dropped,
        stages_completed: engine.hard_sent,
    };
    observability::record_run(
        report.duration.as_secs_f64(),
        report.workers,
        report.stages,
        report.soft_updates_dropped,
    );
    info!(
        workers = report.workers,
        duration_secs = report.duration.as_secs_f64(),
        dropped = report.soft_updates_dropped,
        "pipeline run complete"
    );
    Ok(report)
}

/// Build each worker's starting buffer from the leading stage
fn prepare_buffers(spec: &PipelineSpec) -> Result<Vec<TextureBuffer>, PipelineError> {
    match spec.leading() {
        StageSpec::Generate { count, width, height }
        | StageSpec::Noisy {
            count,
            width,
            height,
            ..
        }
        | StageSpec::Wosy {
            count,
            width,
            height,
            ..
        }
        | StageSpec::DirectionalNoise {
            count,
            width,
            height,
            ..
        } => Ok((0..*count)
            .map(|_| TextureBuffer::new(*width, *height))
            .collect()),
        StageSpec::Input { paths } => paths
            .iter()
            .map(|path| texture_ops::load_texture(path))
            .collect(),
        other => Err(PipelineError::InvalidLeadingStage {
            stage: other.kind().to_string(),
        }),
    }
}
