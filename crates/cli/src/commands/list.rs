//! `commands` command implementation.

use anyhow::{Context, Result};

use crate::cli::CommandsArgs;

/// List every stage command with its usage line
pub fn run_commands_list(args: &CommandsArgs) -> Result<()> {
    let summaries = command_parser::command_summaries();

    if args.json {
        let json =
            serde_json::to_string_pretty(&summaries).context("Failed to serialize command list")?;
        println!("{}", json);
        return Ok(());
    }

    println!("Stage commands (pipe with '|', start with a generator):\n");
    for line in summaries {
        println!("  {line}");
    }
    println!("\nShell commands: help [command], yolo, exit");
    Ok(())
}
