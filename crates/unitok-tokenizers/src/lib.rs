//! Checkpoint-aware tokenization for language models
//!
//! This crate puts a single encode/decode contract in front of the two
//! tokenizer engines model checkpoints ship with:
//!
//! - `tokenizer.json` (Hugging Face `tokenizers`, byte-pair style)
//! - `tokenizer.model` (SentencePiece, unigram style; `spm` feature)
//!
//! On top of the engine it resolves BOS/EOS ids from the checkpoint's
//! `tokenizer_config.json` / `generation_config.json` (repairing the latter
//! when it is malformed) and normalizes the leading BOS token according to the
//! model family's policy.
//!
//! # Example
//!
//! ```no_run
//! use unitok_tokenizers::UnifiedTokenizer;
//!
//! let tokenizer = UnifiedTokenizer::initialize("checkpoints/Llama-3-8B")?;
//! let ids = tokenizer.encode("Hello, world!")?;
//! assert_eq!(ids.first().copied(), tokenizer.bos_id());
//! let text = tokenizer.decode(&ids)?;
//! # Ok::<(), unitok_tokenizers::TokenizerError>(())
//! ```

pub mod checkpoint;
pub mod config;
pub mod error;
pub mod hf_tokenizer;
pub mod json_repair;
pub mod loader;
pub mod mock;
pub mod special_tokens;
pub mod spm_tokenizer;
pub mod unified;

pub use checkpoint::{BackendKind, CheckpointDescriptor};
pub use config::TokenizerOptions;
pub use error::{Result, SpecialTokenKind, TokenizerError};
pub use hf_tokenizer::HfBackend;
pub use loader::load_backend;
pub use mock::MockBackend;
pub use special_tokens::{SpecialTokenConfig, TokenSpec, TokenizerConfigFile};
#[cfg(feature = "spm")]
pub use spm_tokenizer::SpmBackend;
pub use unified::UnifiedTokenizer;

/// Capability set shared by every tokenizer engine.
///
/// Implementations do no special-token handling of their own beyond what the
/// engine's serialized configuration already does; BOS/EOS policy lives in
/// [`UnifiedTokenizer`].
pub trait TokenizerBackend: Send + Sync {
    /// Number of base vocabulary entries, excluding added tokens.
    fn vocab_size(&self) -> usize;

    /// Look up the id of `token`.
    ///
    /// # Errors
    /// Returns [`TokenizerError::UnknownToken`] when the token is not in the
    /// vocabulary.
    fn token_to_id(&self, token: &str) -> Result<u32>;

    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    fn decode(&self, tokens: &[u32]) -> Result<String>;

    /// BOS id declared by the engine's own model file, if any.
    fn intrinsic_bos_id(&self) -> Option<u32> {
        None
    }

    /// EOS id declared by the engine's own model file, if any.
    fn intrinsic_eos_id(&self) -> Option<u32> {
        None
    }
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
