//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};

/// pixelforge - concurrent image-generation pipelines with live progress
#[derive(Parser, Debug)]
#[command(
    name = "pixelforge",
    author,
    version,
    about = "Concurrent image-generation pipeline tool",
    long_about = "Runs user-specified image pipelines over N parallel workers, one output \n\
                  image per worker, with live per-worker per-stage progress.\n\n\
                  Start the interactive shell with no arguments, or run a single \n\
                  pipeline with `run`."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "PIXELFORGE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "PIXELFORGE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single pipeline and exit
    Run(RunArgs),

    /// Parse and validate a pipeline without running it
    Validate(ValidateArgs),

    /// List available stage commands
    Commands(CommandsArgs),

    /// Start the interactive shell (the default)
    Shell(ShellArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Pipeline to run, e.g. "generate 3 256 256 | blur 2 2 | output img"
    pub pipeline: String,

    /// Disable large-count warnings for this run
    #[arg(long)]
    pub yolo: bool,

    /// Skip the progress display
    #[arg(long)]
    pub no_progress: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "PIXELFORGE_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Pipeline to validate
    pub pipeline: String,

    /// Disable large-count warnings
    #[arg(long)]
    pub yolo: bool,

    /// Output the parsed pipeline as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `commands` command
#[derive(Parser, Debug)]
pub struct CommandsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `shell` command
#[derive(Parser, Debug, Default)]
pub struct ShellArgs {
    /// Start with large-count warnings disabled
    #[arg(long)]
    pub yolo: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}
