//! Error types for checkpoint tokenizers.

use std::path::PathBuf;
use thiserror::Error;

/// Which special token a [`TokenizerError::MissingSpecialToken`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialTokenKind {
    Bos,
    Eos,
}

impl std::fmt::Display for SpecialTokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bos => f.write_str("bos"),
            Self::Eos => f.write_str("eos"),
        }
    }
}

/// Main error type for checkpoint tokenizers.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TokenizerError {
    /// Checkpoint directory does not exist
    #[error("checkpoint directory doesn't exist: {}", path.display())]
    MissingCheckpoint { path: PathBuf },

    /// Neither `tokenizer_config.json` nor `tokenizer.model` was found
    #[error("unsupported tokenizer in checkpoint directory {}: expected tokenizer_config.json or tokenizer.model", path.display())]
    UnsupportedBackend { path: PathBuf },

    /// Token string is not part of the vocabulary
    #[error("{token} not found in the vocabulary")]
    UnknownToken { token: String },

    /// JSON config could not be parsed, even after repair
    #[error("failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A special token is required by policy but no id was resolved
    #[error("this tokenizer doesn't have a defined {kind} token")]
    MissingSpecialToken { kind: SpecialTokenKind },

    /// I/O error with file context
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error reported by the underlying tokenization engine
    #[error("tokenizer backend error: {reason}")]
    Backend { reason: String },
}

impl TokenizerError {
    pub(crate) fn backend(reason: impl std::fmt::Display) -> Self {
        Self::Backend { reason: reason.to_string() }
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
