//! Mock backend for testing

use crate::{Result, TokenizerBackend, TokenizerError};
use std::collections::HashMap;

/// Whitespace word-level backend over a fixed vocabulary.
///
/// `encode` emits the configured engine prefix (e.g. a BOS the engine's own
/// post-processor would add) followed by one id per word.
pub struct MockBackend {
    pieces: Vec<String>,
    ids: HashMap<String, u32>,
    prefix: Vec<u32>,
    bos_id: Option<u32>,
    eos_id: Option<u32>,
}

impl MockBackend {
    pub fn new(vocab: &[&str]) -> Self {
        let pieces: Vec<String> = vocab.iter().map(|s| s.to_string()).collect();
        let ids = pieces.iter().enumerate().map(|(i, p)| (p.clone(), i as u32)).collect();
        Self { pieces, ids, prefix: Vec::new(), bos_id: None, eos_id: None }
    }

    /// Ids prepended to every encode result.
    pub fn with_engine_prefix(mut self, prefix: &[u32]) -> Self {
        self.prefix = prefix.to_vec();
        self
    }

    /// Special ids reported as declared by the engine itself.
    pub fn with_intrinsic_ids(mut self, bos_id: Option<u32>, eos_id: Option<u32>) -> Self {
        self.bos_id = bos_id;
        self.eos_id = eos_id;
        self
    }
}

impl TokenizerBackend for MockBackend {
    fn vocab_size(&self) -> usize {
        self.pieces.len()
    }

    fn token_to_id(&self, token: &str) -> Result<u32> {
        self.ids
            .get(token)
            .copied()
            .ok_or_else(|| TokenizerError::UnknownToken { token: token.to_string() })
    }

    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let mut ids = self.prefix.clone();
        for word in text.split_whitespace() {
            let id = self
                .ids
                .get(word)
                .copied()
                .ok_or_else(|| TokenizerError::backend(format!("no id for word {word:?}")))?;
            ids.push(id);
        }
        Ok(ids)
    }

    fn decode(&self, tokens: &[u32]) -> Result<String> {
        let words = tokens
            .iter()
            .map(|&id| {
                self.pieces
                    .get(id as usize)
                    .map(String::as_str)
                    .ok_or_else(|| TokenizerError::backend(format!("id {id} out of range")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(words.join(" "))
    }

    fn intrinsic_bos_id(&self) -> Option<u32> {
        self.bos_id
    }

    fn intrinsic_eos_id(&self) -> Option<u32> {
        self.eos_id
    }
}
