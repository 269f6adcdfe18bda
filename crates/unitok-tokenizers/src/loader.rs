//! Backend construction for a detected checkpoint.

use tracing::info;

use crate::checkpoint::{BackendKind, CheckpointDescriptor};
use crate::hf_tokenizer::HfBackend;
use crate::special_tokens::TokenizerConfigFile;
use crate::{Result, TokenizerBackend};

/// Build the engine matching `checkpoint.backend_kind()`.
///
/// `tokenizer_config` decides whether the Hugging Face backend gets the
/// single-token decoding fix.
pub fn load_backend(
    checkpoint: &CheckpointDescriptor,
    tokenizer_config: Option<&TokenizerConfigFile>,
) -> Result<Box<dyn TokenizerBackend>> {
    match checkpoint.backend_kind() {
        BackendKind::BpeStyle => {
            let path = checkpoint.tokenizer_json_path();
            let decoding_fix = tokenizer_config.is_some_and(TokenizerConfigFile::needs_decoding_fix);
            info!("Using tokenizer: {} (decoding fix: {decoding_fix})", path.display());
            Ok(Box::new(HfBackend::from_file(&path)?.with_decoding_fix(decoding_fix)))
        }
        BackendKind::UnigramStyle => load_unigram(checkpoint),
    }
}

#[cfg(feature = "spm")]
fn load_unigram(checkpoint: &CheckpointDescriptor) -> Result<Box<dyn TokenizerBackend>> {
    let path = checkpoint.tokenizer_model_path();
    info!("Using tokenizer: {}", path.display());
    Ok(Box::new(crate::spm_tokenizer::SpmBackend::from_file(&path)?))
}

#[cfg(not(feature = "spm"))]
fn load_unigram(checkpoint: &CheckpointDescriptor) -> Result<Box<dyn TokenizerBackend>> {
    Err(crate::TokenizerError::backend(format!(
        "{} requires SentencePiece support, which is not compiled in (enable the `spm` feature)",
        checkpoint.tokenizer_model_path().display()
    )))
}
