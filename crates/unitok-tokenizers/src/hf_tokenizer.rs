//! Hugging Face tokenizers.json support

use std::path::Path;

use crate::{Result, TokenizerBackend, TokenizerError};

/// Token decoded in front of a lone token when the decoding fix is active.
pub const DECODE_PROBE_ID: u32 = 33;

/// Byte-pair style backend backed by the `tokenizers` crate.
pub struct HfBackend {
    inner: tokenizers::Tokenizer,
    decoding_fix: bool,
}

impl HfBackend {
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|source| TokenizerError::Io { path: path.to_path_buf(), source })?;
        let inner = tokenizers::Tokenizer::from_bytes(&bytes).map_err(|e| {
            TokenizerError::backend(format!("failed to load {}: {e}", path.display()))
        })?;
        Ok(Self::new(inner))
    }

    pub fn new(inner: tokenizers::Tokenizer) -> Self {
        Self { inner, decoding_fix: false }
    }

    /// Enable the single-token leading-whitespace fix.
    ///
    /// Llama-style tokenizers drop the leading space of a word piece when it
    /// is decoded on its own; decoding it behind [`DECODE_PROBE_ID`] keeps it.
    pub fn with_decoding_fix(mut self, enabled: bool) -> Self {
        self.decoding_fix = enabled;
        self
    }

    pub fn decoding_fix(&self) -> bool {
        self.decoding_fix
    }

    pub fn inner(&self) -> &tokenizers::Tokenizer {
        &self.inner
    }

    fn decode_raw(&self, tokens: &[u32]) -> Result<String> {
        self.inner
            .decode(tokens, true)
            .map_err(|e| TokenizerError::backend(format!("decode error: {e}")))
    }

    fn decode_single_with_probe(&self, token: u32) -> Result<String> {
        let probe = self.decode_raw(&[DECODE_PROBE_ID])?;
        let joined = self.decode_raw(&[DECODE_PROBE_ID, token])?;
        Ok(strip_probe(&joined, &probe))
    }
}

fn strip_probe(joined: &str, probe: &str) -> String {
    match joined.strip_prefix(probe) {
        Some(rest) => rest.to_string(),
        None => joined.chars().skip(probe.chars().count()).collect(),
    }
}

impl TokenizerBackend for HfBackend {
    fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(false)
    }

    fn token_to_id(&self, token: &str) -> Result<u32> {
        self.inner
            .token_to_id(token)
            .ok_or_else(|| TokenizerError::UnknownToken { token: token.to_string() })
    }

    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .inner
            .encode(text, true)
            .map_err(|e| TokenizerError::backend(format!("encode error: {e}")))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, tokens: &[u32]) -> Result<String> {
        match tokens {
            [token] if self.decoding_fix => self.decode_single_with_probe(*token),
            _ => self.decode_raw(tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_probe_removes_exact_prefix() {
        assert_eq!(strip_probe("x world", "x"), " world");
    }

    #[test]
    fn strip_probe_falls_back_to_char_count() {
        // The engine may normalize the probe differently inside a sequence.
        assert_eq!(strip_probe("X world", "x"), " world");
        assert_eq!(strip_probe("é!", "e"), "!");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = match HfBackend::from_file(Path::new("does/not/exist/tokenizer.json")) {
            Ok(_) => panic!("loading a missing file must fail"),
            Err(err) => err,
        };
        assert!(matches!(err, TokenizerError::Io { .. }));
        assert!(err.to_string().contains("tokenizer.json"));
    }
}
