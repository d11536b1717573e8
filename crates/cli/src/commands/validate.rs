//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use command_parser::{parse, Command, ParserOptions};
use contracts::PipelineSpec;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    pipeline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<PipelineSummary>,
}

#[derive(Serialize)]
struct PipelineSummary {
    workers: usize,
    stages: usize,
    spec: PipelineSpec,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(pipeline = %args.pipeline, "Validating pipeline");

    let mut options = ParserOptions::default();
    if args.yolo {
        options.disable_warnings();
    }

    let result = validate_pipeline(&args.pipeline, &options);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Pipeline validation failed")
    }
}

fn validate_pipeline(pipeline: &str, options: &ParserOptions) -> ValidationResult {
    match parse(pipeline, options) {
        Ok(Command::Pipeline(spec)) => ValidationResult {
            valid: true,
            pipeline: pipeline.to_string(),
            error: None,
            summary: Some(PipelineSummary {
                workers: spec.worker_count().unwrap_or(0),
                stages: spec.stage_count(),
                spec,
            }),
        },
        Ok(other) => ValidationResult {
            valid: false,
            pipeline: pipeline.to_string(),
            error: Some(format!("not a runnable pipeline: {other:?}")),
            summary: None,
        },
        Err(e) => ValidationResult {
            valid: false,
            pipeline: pipeline.to_string(),
            error: Some(e.to_string()),
            summary: None,
        },
    }
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Pipeline is valid: {}", result.pipeline);
        if let Some(ref summary) = result.summary {
            println!("\n  Workers: {}", summary.workers);
            println!("  Stages: {}", summary.stages);
        }
    } else {
        println!("✗ Pipeline is invalid: {}", result.pipeline);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
