//! Encode command implementation.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use unitok_tokenizers::TokenizerOptions;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Checkpoint directory
    pub checkpoint: PathBuf,

    /// Text to encode ("-" reads stdin)
    pub text: String,

    /// Always start with BOS, whatever the checkpoint's policy
    #[arg(long, conflicts_with = "no_bos")]
    pub bos: bool,

    /// Never start with BOS
    #[arg(long)]
    pub no_bos: bool,

    /// Append EOS
    #[arg(long)]
    pub eos: bool,

    /// Keep at most this many tokens (applied last)
    #[arg(long, value_name = "N")]
    pub max_length: Option<usize>,
}

impl EncodeCommand {
    pub fn bos_override(&self) -> Option<bool> {
        match (self.bos, self.no_bos) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    fn framed(&self) -> bool {
        self.bos || self.no_bos || self.eos || self.max_length.is_some()
    }
}

pub fn run(cmd: EncodeCommand, options: TokenizerOptions) -> Result<()> {
    let tokenizer = super::load_tokenizer(&cmd.checkpoint, options)?;

    let text = if cmd.text == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
        buffer
    } else {
        cmd.text.clone()
    };

    let ids = if cmd.framed() {
        tokenizer.encode_framed(&text, cmd.bos_override(), cmd.eos, cmd.max_length)?
    } else {
        tokenizer.encode(&text)?
    };

    let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    println!("{}", ids.join(" "));
    Ok(())
}
