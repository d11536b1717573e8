//! # pixelforge CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - the interactive shell (default command)
//! - one-shot pipeline runs and validation
//! - logging/metrics initialization

mod cli;
mod commands;
mod render;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::Layer;

use cli::{Cli, Commands};
use commands::{run_commands_list, run_pipeline_once, run_shell, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on CLI options
    init_logging(&cli)?;

    info!(version = env!("CARGO_PKG_VERSION"), "pixelforge starting");

    // Execute command; no subcommand means the interactive shell
    let result = match &cli.command {
        Some(Commands::Run(args)) => run_pipeline_once(args).await,
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Commands(args)) => run_commands_list(args),
        Some(Commands::Shell(args)) => run_shell(args).await,
        None => run_shell(&cli::ShellArgs::default()).await,
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else {
        let default_level = match cli.verbose {
            // The shell redraws progress bars in place; keep the default
            // level quiet enough not to tear them.
            0 if matches!(cli.command, None | Some(Commands::Shell(_))) => "warn",
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    let fmt_layer = match cli.log_format {
        cli::LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        cli::LogFormat::Pretty => fmt::layer().pretty().boxed(),
        cli::LogFormat::Compact => fmt::layer().compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
