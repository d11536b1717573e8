//! `run` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use command_parser::{parse, Command, ParserOptions};
use runner::NullView;

use crate::cli::RunArgs;
use crate::render::TerminalRenderer;

/// Execute the `run` command: one pipeline, then exit
pub async fn run_pipeline_once(args: &RunArgs) -> Result<()> {
    let mut options = ParserOptions::default();
    if args.yolo {
        options.disable_warnings();
    }

    // Metrics exporter is opt-in for one-shot runs
    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
        info!(port = args.metrics_port, "Metrics endpoint available");
    }

    let spec = match parse(&args.pipeline, &options).context("Failed to parse pipeline")? {
        Command::Pipeline(spec) => spec,
        other => anyhow::bail!("'{}' is not a runnable pipeline: {other:?}", args.pipeline),
    };

    info!(
        workers = spec.worker_count(),
        stages = spec.stage_count(),
        "Pipeline parsed, starting run"
    );

    let report = if args.no_progress {
        let mut view = NullView;
        runner::run_pipeline(spec, &mut view).await?
    } else {
        let mut view = TerminalRenderer::new();
        let result = runner::run_pipeline(spec, &mut view).await;
        view.finish();
        result?
    };

    report.print_summary();
    Ok(())
}
