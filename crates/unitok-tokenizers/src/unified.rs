//! The checkpoint-level tokenizer: backend plus resolved special tokens.

use std::path::Path;

use tracing::{debug, info};

use crate::checkpoint::{BackendKind, CheckpointDescriptor};
use crate::special_tokens::{self, SpecialTokenConfig, TokenizerConfigFile};
use crate::{Result, TokenizerBackend, TokenizerOptions, load_backend};

/// One tokenizer for any supported checkpoint.
///
/// Owns the detected checkpoint, its backend and the resolved special-token
/// state; all of it is fixed once [`initialize`](Self::initialize) returns.
pub struct UnifiedTokenizer {
    checkpoint: CheckpointDescriptor,
    backend: Box<dyn TokenizerBackend>,
    specials: SpecialTokenConfig,
}

impl std::fmt::Debug for UnifiedTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnifiedTokenizer")
            .field("checkpoint", &self.checkpoint)
            .field("specials", &self.specials)
            .field("vocab_size", &self.backend.vocab_size())
            .finish()
    }
}

impl UnifiedTokenizer {
    /// Load the tokenizer of the checkpoint in `checkpoint_dir`, with options
    /// taken from the environment.
    ///
    /// # Errors
    /// - [`MissingCheckpoint`](crate::TokenizerError::MissingCheckpoint) if the directory does not exist
    /// - [`UnsupportedBackend`](crate::TokenizerError::UnsupportedBackend) if it has neither
    ///   `tokenizer_config.json` nor `tokenizer.model`
    /// - [`ConfigParse`](crate::TokenizerError::ConfigParse) for unreadable config JSON
    /// - [`UnknownToken`](crate::TokenizerError::UnknownToken) if a configured special token is
    ///   not in the vocabulary
    pub fn initialize(checkpoint_dir: impl AsRef<Path>) -> Result<Self> {
        Self::initialize_with(checkpoint_dir, TokenizerOptions::from_env())
    }

    pub fn initialize_with(checkpoint_dir: impl AsRef<Path>, options: TokenizerOptions) -> Result<Self> {
        let checkpoint = CheckpointDescriptor::detect(checkpoint_dir)?;
        let tokenizer_config = TokenizerConfigFile::load_optional(&checkpoint)?;
        let backend = load_backend(&checkpoint, tokenizer_config.as_ref())?;
        let specials =
            special_tokens::resolve(&checkpoint, tokenizer_config.as_ref(), backend.as_ref(), &options)?;

        info!(
            "Loaded {} tokenizer for {}: vocab={} bos={:?} eos={:?} use_bos={}",
            checkpoint.backend_kind(),
            checkpoint.name(),
            backend.vocab_size(),
            specials.bos_id,
            specials.eos_id,
            specials.use_bos
        );
        Ok(Self::from_parts(checkpoint, backend, specials))
    }

    /// Assemble a tokenizer from an already constructed backend.
    pub fn from_parts(
        checkpoint: CheckpointDescriptor,
        backend: Box<dyn TokenizerBackend>,
        specials: SpecialTokenConfig,
    ) -> Self {
        Self { checkpoint, backend, specials }
    }

    /// Encode `text`, then add or strip the leading BOS per the checkpoint's
    /// policy.
    ///
    /// # Errors
    /// [`MissingSpecialToken`](crate::TokenizerError::MissingSpecialToken) if
    /// the policy needs a BOS token the checkpoint never defined.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let tokens = self.backend.encode(text)?;
        self.specials.normalize_bos(tokens, self.specials.use_bos)
    }

    pub fn decode(&self, tokens: &[u32]) -> Result<String> {
        self.backend.decode(tokens)
    }

    /// Encode with explicit framing.
    ///
    /// `bos` overrides the checkpoint's BOS policy when set. With `eos`, the
    /// EOS id is appended unless already last. A positive `max_length`
    /// truncates the result last, so a trailing EOS can be cut off.
    pub fn encode_framed(
        &self,
        text: &str,
        bos: Option<bool>,
        eos: bool,
        max_length: Option<usize>,
    ) -> Result<Vec<u32>> {
        let add_bos = bos.unwrap_or(self.specials.use_bos);
        let mut tokens = self.specials.normalize_bos(self.backend.encode(text)?, add_bos)?;
        if eos {
            tokens = self.specials.append_eos(tokens)?;
        }
        if let Some(max_length) = max_length.filter(|&n| n > 0)
            && tokens.len() > max_length
        {
            debug!("truncating {} tokens to {max_length}", tokens.len());
            tokens.truncate(max_length);
        }
        Ok(tokens)
    }

    pub fn vocab_size(&self) -> usize {
        self.backend.vocab_size()
    }

    pub fn token_to_id(&self, token: &str) -> Result<u32> {
        self.backend.token_to_id(token)
    }

    pub fn bos_id(&self) -> Option<u32> {
        self.specials.bos_id
    }

    pub fn eos_id(&self) -> Option<u32> {
        self.specials.eos_id
    }

    pub fn use_bos(&self) -> bool {
        self.specials.use_bos
    }

    pub fn special_tokens(&self) -> &SpecialTokenConfig {
        &self.specials
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.checkpoint.backend_kind()
    }

    pub fn model_name(&self) -> &str {
        self.checkpoint.name()
    }

    pub fn checkpoint(&self) -> &CheckpointDescriptor {
        &self.checkpoint
    }
}
