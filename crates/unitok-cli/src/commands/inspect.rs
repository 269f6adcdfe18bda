//! Inspect command implementation.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use unitok_tokenizers::{TokenizerOptions, UnifiedTokenizer};

/// Inspect command arguments.
#[derive(Parser)]
pub struct InspectCommand {
    /// Checkpoint directory
    pub checkpoint: PathBuf,

    /// Print a JSON object instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    name: &'a str,
    backend: &'static str,
    vocab_size: usize,
    bos_id: Option<u32>,
    eos_id: Option<u32>,
    use_bos: bool,
}

impl<'a> Summary<'a> {
    fn of(tokenizer: &'a UnifiedTokenizer) -> Self {
        Self {
            name: tokenizer.model_name(),
            backend: tokenizer.backend_kind().as_str(),
            vocab_size: tokenizer.vocab_size(),
            bos_id: tokenizer.bos_id(),
            eos_id: tokenizer.eos_id(),
            use_bos: tokenizer.use_bos(),
        }
    }
}

fn show(id: Option<u32>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

pub fn run(cmd: InspectCommand, options: TokenizerOptions) -> Result<()> {
    let tokenizer = super::load_tokenizer(&cmd.checkpoint, options)?;
    let summary = Summary::of(&tokenizer);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("name:       {}", summary.name);
    println!("backend:    {}", summary.backend);
    println!("vocab size: {}", summary.vocab_size);
    println!("bos id:     {}", show(summary.bos_id));
    println!("eos id:     {}", show(summary.eos_id));
    println!("use bos:    {}", summary.use_bos);
    Ok(())
}
