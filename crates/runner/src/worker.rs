//! Worker tasks
//!
//! One task per output image. A worker rendezvous-waits at the gate, then
//! runs the full stage chain serially against its own buffer on a blocking
//! thread - stage routines are CPU-bound and report progress through a
//! blocking-capable channel, so they must not run on the async executor.

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use contracts::{PipelineSpec, ProgressSink, StageSpec, TextureBuffer, WorkerId};
use progress_engine::WorkerLink;

/// One spawned worker: gate arrival plus the blocking stage chain
pub(crate) struct WorkerTask {
    pub(crate) link: WorkerLink,
    pub(crate) buffer: TextureBuffer,
    pub(crate) spec: Arc<PipelineSpec>,
}

impl WorkerTask {
    pub(crate) fn spawn(mut self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.link.arrive().await;
            let WorkerTask {
                link,
                mut buffer,
                spec,
            } = self;
            let blocking = tokio::task::spawn_blocking(move || {
                execute_chain(&spec, link, &mut buffer);
            });
            if let Err(e) = blocking.await {
                warn!(error = ?e, "worker stage chain panicked");
            }
        })
    }
}

/// Run every stage in order against the worker's buffer
fn execute_chain(spec: &PipelineSpec, link: WorkerLink, buffer: &mut TextureBuffer) {
    let worker = link.worker();
    let mut rng = SmallRng::from_os_rng();
    debug!(worker = %worker, stages = spec.stage_count(), "worker starting stage chain");

    for (stage_index, stage) in spec.stages().iter().enumerate() {
        let mut reporter = link.stage_reporter(stage_index);
        dispatch_stage(stage, buffer, worker, &mut rng, &mut reporter);
    }
    debug!(worker = %worker, "worker finished stage chain");
}

/// Dispatch one stage to its routine.
///
/// Every arm upholds the progress contract: exactly one terminal report per
/// stage, even when the underlying work fails (a failed save is logged and
/// the stage still completes - stalling the reporter loop helps nobody).
fn dispatch_stage(
    stage: &StageSpec,
    buffer: &mut TextureBuffer,
    worker: WorkerId,
    rng: &mut SmallRng,
    reporter: &mut dyn ProgressSink,
) {
    observability::record_stage(stage.kind().command_name());
    match stage {
        StageSpec::Generate { .. } => texture_ops::generate(buffer, rng, reporter),
        // The buffer was decoded before the run started; this stage only
        // participates in progress accounting.
        StageSpec::Input { .. } => {
            reporter.report(1.0);
        }
        StageSpec::Noisy { pivots, .. } => texture_ops::noisy(buffer, *pivots, rng, reporter),
        StageSpec::Wosy { pivots, .. } => texture_ops::wosy(buffer, *pivots, rng, reporter),
        StageSpec::DirectionalNoise { pivots, .. } => {
            texture_ops::directional_noise(buffer, *pivots, rng, reporter)
        }
        StageSpec::Blur { radius_x, radius_y } => {
            texture_ops::blur(buffer, *radius_x, *radius_y, reporter)
        }
        StageSpec::RandomCircles { count, radius } => {
            let circles = texture_ops::scatter_circles(*count, *radius, rng);
            texture_ops::draw_circles(buffer, &circles, reporter);
        }
        StageSpec::Room { x1, y1, x2, y2 } => {
            texture_ops::room(buffer, *x1, *y1, *x2, *y2, reporter)
        }
        StageSpec::ColorCorrection { red, green, blue } => {
            texture_ops::color_correction(buffer, *red, *green, *blue, reporter)
        }
        StageSpec::GammaCorrection { gamma } => {
            texture_ops::gamma_correction(buffer, *gamma, reporter)
        }
        StageSpec::NoisyCross { pivots, mono } => {
            texture_ops::noisy_cross(buffer, *pivots, *mono, rng, reporter)
        }
        StageSpec::PointCross { x, y } => texture_ops::point_cross(buffer, *x, *y, reporter),
        StageSpec::Output { path } => {
            reporter.report(0.5);
            if let Err(e) = texture_ops::save_worker_texture(buffer, path, worker) {
                warn!(worker = %worker, error = %e, "output stage failed to save image");
            }
            reporter.report(1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Rgba;

    struct Collect(Vec<f32>);
    impl ProgressSink for Collect {
        fn report(&mut self, progress: f32) -> bool {
            self.0.push(progress);
            true
        }
    }

    fn dispatch(stage: StageSpec, buffer: &mut TextureBuffer) -> Vec<f32> {
        let mut sink = Collect(Vec::new());
        let mut rng = SmallRng::seed_from_u64(1);
        dispatch_stage(&stage, buffer, WorkerId(0), &mut rng, &mut sink);
        sink.0
    }

    #[test]
    fn test_every_stage_kind_sends_one_terminal_report() {
        let dir = tempfile::tempdir().unwrap();
        let out = format!("{}/probe.png", dir.path().display());
        let stages = vec![
            StageSpec::Generate {
                count: 1,
                width: 16,
                height: 16,
            },
            StageSpec::Input { paths: vec![] },
            StageSpec::Noisy {
                count: 1,
                pivots: 3,
                width: 16,
                height: 16,
            },
            StageSpec::Wosy {
                count: 1,
                pivots: 3,
                width: 16,
                height: 16,
            },
            StageSpec::DirectionalNoise {
                count: 1,
                pivots: 3,
                width: 16,
                height: 16,
            },
            StageSpec::Blur {
                radius_x: 1,
                radius_y: 1,
            },
            StageSpec::RandomCircles {
                count: 3,
                radius: 0.2,
            },
            StageSpec::Room {
                x1: 0.2,
                y1: 0.2,
                x2: 0.8,
                y2: 0.8,
            },
            StageSpec::ColorCorrection {
                red: 0.1,
                green: 0.0,
                blue: -0.1,
            },
            StageSpec::GammaCorrection { gamma: 0.8 },
            StageSpec::NoisyCross {
                pivots: 3,
                mono: false,
            },
            StageSpec::PointCross { x: 0.5, y: 0.5 },
            StageSpec::Output { path: out },
        ];

        for stage in stages {
            let mut buffer = TextureBuffer::from_pixels(16, 16, vec![Rgba::opaque(50, 60, 70); 256]);
            let reports = dispatch(stage.clone(), &mut buffer);
            let terminal = reports.iter().filter(|p| **p >= 1.0).count();
            assert_eq!(terminal, 1, "stage {:?} broke the terminal contract", stage);
            assert_eq!(*reports.last().unwrap(), 1.0);
        }
    }

    #[test]
    fn test_output_failure_still_completes_stage() {
        let mut buffer = TextureBuffer::new(4, 4);
        // Unwritable target: a directory path that cannot be created.
        let reports = dispatch(
            StageSpec::Output {
                path: "/proc/definitely/not/writable/img.png".to_string(),
            },
            &mut buffer,
        );
        assert_eq!(*reports.last().unwrap(), 1.0);
    }
}
