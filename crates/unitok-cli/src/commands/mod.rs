//! CLI commands for unitok.

pub mod decode;
pub mod encode;
pub mod inspect;
pub mod repair_json;

pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use inspect::InspectCommand;
pub use repair_json::RepairJsonCommand;

use anyhow::{Context, Result};
use std::path::Path;
use unitok_tokenizers::{TokenizerOptions, UnifiedTokenizer};

pub(crate) fn load_tokenizer(checkpoint: &Path, options: TokenizerOptions) -> Result<UnifiedTokenizer> {
    UnifiedTokenizer::initialize_with(checkpoint, options)
        .with_context(|| format!("Failed to load tokenizer from {}", checkpoint.display()))
}
