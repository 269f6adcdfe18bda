//! Checkpoint directory layout and backend detection.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Result, TokenizerError};

pub const TOKENIZER_JSON: &str = "tokenizer.json";
pub const TOKENIZER_CONFIG_JSON: &str = "tokenizer_config.json";
pub const GENERATION_CONFIG_JSON: &str = "generation_config.json";
pub const TOKENIZER_MODEL: &str = "tokenizer.model";

/// Which engine a checkpoint's vocabulary is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// `tokenizer.json`, loaded with Hugging Face `tokenizers`.
    BpeStyle,
    /// `tokenizer.model`, loaded with SentencePiece.
    UnigramStyle,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BpeStyle => "bpe",
            Self::UnigramStyle => "unigram",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A checkpoint directory whose tokenizer backend has been detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointDescriptor {
    root: PathBuf,
    name: String,
    backend_kind: BackendKind,
}

impl CheckpointDescriptor {
    /// Inspect `dir` and decide which backend it uses.
    ///
    /// `tokenizer_config.json` wins over `tokenizer.model`: checkpoints that
    /// ship both are served by the `tokenizer.json` next to the config.
    pub fn detect(dir: impl AsRef<Path>) -> Result<Self> {
        let root = dir.as_ref();
        if !root.is_dir() {
            return Err(TokenizerError::MissingCheckpoint { path: root.to_path_buf() });
        }

        let backend_kind = if root.join(TOKENIZER_CONFIG_JSON).is_file() {
            BackendKind::BpeStyle
        } else if root.join(TOKENIZER_MODEL).is_file() {
            BackendKind::UnigramStyle
        } else {
            return Err(TokenizerError::UnsupportedBackend { path: root.to_path_buf() });
        };

        let descriptor = Self::new(root, backend_kind);
        debug!(
            "checkpoint {} ({}) uses the {} backend",
            descriptor.name,
            root.display(),
            backend_kind
        );
        Ok(descriptor)
    }

    /// Build a descriptor without probing the filesystem for marker files.
    pub fn new(root: impl Into<PathBuf>, backend_kind: BackendKind) -> Self {
        let root = root.into();
        let name = checkpoint_name(&root);
        Self { root, name, backend_kind }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory name, used for model-family heuristics.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend_kind
    }

    pub fn tokenizer_json_path(&self) -> PathBuf {
        self.root.join(TOKENIZER_JSON)
    }

    pub fn tokenizer_config_path(&self) -> PathBuf {
        self.root.join(TOKENIZER_CONFIG_JSON)
    }

    pub fn generation_config_path(&self) -> PathBuf {
        self.root.join(GENERATION_CONFIG_JSON)
    }

    pub fn tokenizer_model_path(&self) -> PathBuf {
        self.root.join(TOKENIZER_MODEL)
    }
}

// `.`/`..` have no file name of their own.
fn checkpoint_name(root: &Path) -> String {
    let named = |p: &Path| p.file_name().map(|n| n.to_string_lossy().into_owned());
    named(root)
        .or_else(|| root.canonicalize().ok().as_deref().and_then(named))
        .unwrap_or_default()
}
