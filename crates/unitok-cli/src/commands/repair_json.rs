//! Repair-json command implementation.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use unitok_tokenizers::json_repair;

/// Repair-json command arguments.
#[derive(Parser)]
pub struct RepairJsonCommand {
    /// JSON file to repair (left untouched; the result goes to stdout)
    pub file: PathBuf,
}

pub fn run(cmd: RepairJsonCommand) -> Result<()> {
    let text = std::fs::read_to_string(&cmd.file)
        .with_context(|| format!("Failed to read {}", cmd.file.display()))?;
    let value = json_repair::parse_lenient(&text, true)
        .with_context(|| format!("{} is not repairable JSON", cmd.file.display()))?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
