//! Interactive shell
//!
//! A plain read-eval loop: prompt, parse, run, repeat. Parse and run errors
//! are printed and the shell keeps accepting commands; only `exit` or EOF
//! leaves. No line editing or history - pipe legality and progress bars are
//! the product here, not the line editor.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::debug;

use command_parser::{parse, usage, Command, ParserOptions};
use contracts::StageKind;
use observability::RunMetricsAggregator;

use crate::cli::ShellArgs;
use crate::render::TerminalRenderer;

const PROMPT: &str = "pixelforge> ";

/// Execute the interactive shell
pub async fn run_shell(args: &ShellArgs) -> Result<()> {
    let mut options = ParserOptions::default();
    if args.yolo {
        options.disable_warnings();
    }
    let mut aggregator = RunMetricsAggregator::new();

    println!("pixelforge {} - type 'help' for commands, 'exit' to quit", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // EOF
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse(line, &options) {
            Ok(Command::Exit) => break,
            Ok(Command::Help(topic)) => print_help(topic),
            Ok(Command::DisableWarnings) => {
                options.disable_warnings();
                println!("value warnings disabled for this session");
            }
            Ok(Command::Pipeline(spec)) => {
                let mut view = TerminalRenderer::new();
                let result = runner::run_pipeline(spec, &mut view).await;
                view.finish();
                match result {
                    Ok(report) => {
                        aggregator.update(
                            report.duration.as_secs_f64(),
                            report.workers,
                            report.soft_updates_dropped,
                        );
                        debug!(
                            duration_secs = report.duration.as_secs_f64(),
                            "run finished"
                        );
                    }
                    Err(e) => eprintln!("run error: {e}"),
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    let summary = aggregator.summary();
    if summary.runs > 0 {
        println!(
            "\n{} runs, mean {:.2}s, {} soft updates dropped",
            summary.runs, summary.mean_duration_secs, summary.soft_dropped_total
        );
    }
    Ok(())
}

fn print_help(topic: Option<StageKind>) {
    match topic {
        Some(kind) => println!("  {}", usage(kind)),
        None => {
            println!("Pipe stage commands with '|'; the chain must start with a generator:\n");
            for line in command_parser::command_summaries() {
                println!("  {line}");
            }
            println!("\nShell commands: help [command], yolo, exit");
            println!("Example: generate 3 256 256 | blur 2 2 | output shots/img.png");
        }
    }
}
