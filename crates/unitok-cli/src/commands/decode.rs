//! Decode command implementation.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use unitok_tokenizers::TokenizerOptions;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Checkpoint directory
    pub checkpoint: PathBuf,

    /// Token IDs to decode
    #[arg(required = true)]
    pub ids: Vec<u32>,
}

pub fn run(cmd: DecodeCommand, options: TokenizerOptions) -> Result<()> {
    let tokenizer = super::load_tokenizer(&cmd.checkpoint, options)?;
    println!("{}", tokenizer.decode(&cmd.ids)?);
    Ok(())
}
