//! Special-token resolution and BOS policy.
//!
//! BOS/EOS ids are taken from the first source that defines them:
//!
//! 1. `bos_token` / `eos_token` in `tokenizer_config.json`, mapped through the
//!    backend vocabulary
//! 2. `bos_token_id` / `eos_token_id` in `generation_config.json`, which is
//!    repaired when it fails to parse
//! 3. ids declared by the engine's own model file
//!
//! Whether a BOS token is *used* is a separate decision, see [`use_bos`].

use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::checkpoint::CheckpointDescriptor;
use crate::error::SpecialTokenKind;
use crate::json_repair;
use crate::{Result, TokenizerBackend, TokenizerError, TokenizerOptions};

/// `tokenizer_class` of the SentencePiece-derived Llama tokenizer.
pub const LLAMA_TOKENIZER_CLASS: &str = "LlamaTokenizer";

/// A special token as written in `tokenizer_config.json`: either the bare
/// token string or an added-token object carrying it in `content`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TokenSpec {
    Plain(String),
    Object { content: Option<String> },
}

impl TokenSpec {
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Plain(token) => Some(token),
            Self::Object { content } => content.as_deref(),
        }
    }
}

/// The fields of `tokenizer_config.json` that affect special tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenizerConfigFile {
    pub bos_token: Option<TokenSpec>,
    pub eos_token: Option<TokenSpec>,
    /// Outer `None` when the key is absent; `Some(None)` for an explicit
    /// `null`, which disables BOS.
    #[serde(default, deserialize_with = "present_field")]
    pub add_bos_token: Option<Option<bool>>,
    pub tokenizer_class: Option<String>,
}

fn present_field<'de, D>(deserializer: D) -> std::result::Result<Option<Option<bool>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(Some)
}

impl TokenizerConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_to_string(path)?;
        Self::from_json(&text, path)
    }

    /// Load the checkpoint's `tokenizer_config.json` if it has one.
    pub fn load_optional(checkpoint: &CheckpointDescriptor) -> Result<Option<Self>> {
        let path = checkpoint.tokenizer_config_path();
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// `path` is only used for error context.
    pub fn from_json(text: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|source| TokenizerError::ConfigParse { path: path.to_path_buf(), source })
    }

    /// Llama tokenizer classes (slow and fast) lose the leading space of a
    /// lone decoded token.
    pub fn needs_decoding_fix(&self) -> bool {
        self.tokenizer_class.as_deref().is_some_and(|class| class.contains(LLAMA_TOKENIZER_CLASS))
    }
}

/// Resolved special-token state of a checkpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialTokenConfig {
    pub bos_id: Option<u32>,
    pub eos_id: Option<u32>,
    pub use_bos: bool,
}

impl SpecialTokenConfig {
    /// BOS id, or [`TokenizerError::MissingSpecialToken`] when none resolved.
    pub fn require_bos(&self) -> Result<u32> {
        self.bos_id.ok_or(TokenizerError::MissingSpecialToken { kind: SpecialTokenKind::Bos })
    }

    pub fn require_eos(&self) -> Result<u32> {
        self.eos_id.ok_or(TokenizerError::MissingSpecialToken { kind: SpecialTokenKind::Eos })
    }

    /// Make the leading BOS match `add_bos`.
    ///
    /// With `add_bos` the BOS id must be resolved and is prepended unless
    /// already first. Without it, exactly one leading BOS is dropped.
    pub fn normalize_bos(&self, tokens: Vec<u32>, add_bos: bool) -> Result<Vec<u32>> {
        if add_bos {
            let bos = self.require_bos()?;
            if tokens.first() == Some(&bos) {
                return Ok(tokens);
            }
            let mut framed = Vec::with_capacity(tokens.len() + 1);
            framed.push(bos);
            framed.extend(tokens);
            return Ok(framed);
        }

        let mut tokens = tokens;
        if let Some(bos) = self.bos_id
            && tokens.first() == Some(&bos)
        {
            tokens.remove(0);
        }
        Ok(tokens)
    }

    /// Append EOS unless it is already last.
    pub fn append_eos(&self, mut tokens: Vec<u32>) -> Result<Vec<u32>> {
        let eos = self.require_eos()?;
        if tokens.last() != Some(&eos) {
            tokens.push(eos);
        }
        Ok(tokens)
    }
}

/// Resolve BOS/EOS ids and the BOS policy for `checkpoint`.
///
/// `tokenizer_config` is the parsed `tokenizer_config.json`, if present.
pub fn resolve(
    checkpoint: &CheckpointDescriptor,
    tokenizer_config: Option<&TokenizerConfigFile>,
    backend: &dyn TokenizerBackend,
    options: &TokenizerOptions,
) -> Result<SpecialTokenConfig> {
    let (mut bos_id, mut eos_id) = match tokenizer_config {
        Some(config) => (
            lookup_token(config.bos_token.as_ref(), backend)?,
            lookup_token(config.eos_token.as_ref(), backend)?,
        ),
        None => (None, None),
    };
    debug!("tokenizer_config.json: bos={bos_id:?} eos={eos_id:?}");

    let generation_path = checkpoint.generation_config_path();
    if (bos_id.is_none() || eos_id.is_none()) && generation_path.is_file() {
        let generation = read_generation_config(&generation_path, options.repair_json)?;
        bos_id = bos_id.or_else(|| id_field(&generation, "bos_token_id"));
        eos_id = eos_id.or_else(|| id_field(&generation, "eos_token_id"));
        debug!("after generation_config.json: bos={bos_id:?} eos={eos_id:?}");
    }

    bos_id = bos_id.or_else(|| backend.intrinsic_bos_id());
    eos_id = eos_id.or_else(|| backend.intrinsic_eos_id());

    Ok(SpecialTokenConfig { bos_id, eos_id, use_bos: use_bos(checkpoint, tokenizer_config, options) })
}

/// Whether encoded sequences must start with BOS.
///
/// Independent of whether a BOS id could be resolved; that is only checked
/// when BOS insertion is attempted.
pub fn use_bos(
    checkpoint: &CheckpointDescriptor,
    tokenizer_config: Option<&TokenizerConfigFile>,
    options: &TokenizerOptions,
) -> bool {
    let Some(config) = tokenizer_config else {
        return false;
    };
    if options.is_bos_family(checkpoint.name()) {
        return true;
    }
    if let Some(add_bos) = config.add_bos_token {
        return add_bos.unwrap_or(false);
    }
    config.tokenizer_class.as_deref() == Some(LLAMA_TOKENIZER_CLASS)
}

fn lookup_token(spec: Option<&TokenSpec>, backend: &dyn TokenizerBackend) -> Result<Option<u32>> {
    spec.and_then(TokenSpec::content).map(|token| backend.token_to_id(token)).transpose()
}

fn read_generation_config(path: &Path, allow_repair: bool) -> Result<Value> {
    let text = read_to_string(path)?;
    json_repair::parse_lenient(&text, allow_repair)
        .map_err(|source| TokenizerError::ConfigParse { path: path.to_path_buf(), source })
}

/// Integer id stored under `field`; lists (several EOS ids) contribute their
/// first entry.
fn id_field(config: &Value, field: &str) -> Option<u32> {
    let as_id = |v: &Value| v.as_u64().and_then(|id| u32::try_from(id).ok());
    match config.get(field)? {
        Value::Null => None,
        Value::Array(ids) => ids.first().and_then(as_id),
        value => {
            let id = as_id(value);
            if id.is_none() {
                warn!("ignoring {field}: expected a token id, found {value}");
            }
            id
        }
    }
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|source| TokenizerError::Io { path: path.to_path_buf(), source })
}
