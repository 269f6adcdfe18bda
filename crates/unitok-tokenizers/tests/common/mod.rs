//! Checkpoint fixtures: temporary directories holding a word-level
//! `tokenizer.json` plus whichever config files a test needs.

#![allow(dead_code)]

use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const UNK_ID: u32 = 0;
pub const BOS_ID: u32 = 1;
pub const EOS_ID: u32 = 2;
pub const HELLO_ID: u32 = 3;
pub const WORLD_ID: u32 = 4;
/// `▁world`, a word piece carrying its leading space marker.
pub const SPACED_WORLD_ID: u32 = 5;
/// Same as `unitok_tokenizers::hf_tokenizer::DECODE_PROBE_ID`.
pub const PROBE_ID: u32 = 33;
pub const VOCAB_LEN: usize = 40;

/// `<unk> <s> </s> hello world ▁world w6 .. w39`
pub fn vocab() -> Vec<String> {
    let mut vocab: Vec<String> =
        ["<unk>", "<s>", "</s>", "hello", "world", "\u{2581}world"].iter().map(|s| s.to_string()).collect();
    vocab.extend((vocab.len()..VOCAB_LEN).map(|i| format!("w{i}")));
    vocab
}

#[derive(Default)]
pub struct TokenizerJson {
    /// Engine-level post-processor that prepends `<s>`.
    pub engine_bos: bool,
    /// Metaspace decoder, which drops the leading space of the first token.
    pub metaspace_decoder: bool,
}

impl TokenizerJson {
    pub fn render(&self) -> String {
        let vocab_map: serde_json::Map<String, Value> =
            vocab().into_iter().enumerate().map(|(i, piece)| (piece, json!(i))).collect();
        let added = |id: u32, content: &str| {
            json!({
                "id": id,
                "content": content,
                "single_word": false,
                "lstrip": false,
                "rstrip": false,
                "normalized": false,
                "special": true
            })
        };
        let post_processor = if self.engine_bos {
            json!({
                "type": "TemplateProcessing",
                "single": [
                    {"SpecialToken": {"id": "<s>", "type_id": 0}},
                    {"Sequence": {"id": "A", "type_id": 0}}
                ],
                "pair": [
                    {"SpecialToken": {"id": "<s>", "type_id": 0}},
                    {"Sequence": {"id": "A", "type_id": 0}},
                    {"Sequence": {"id": "B", "type_id": 1}}
                ],
                "special_tokens": {
                    "<s>": {"id": "<s>", "ids": [BOS_ID], "tokens": ["<s>"]}
                }
            })
        } else {
            Value::Null
        };
        let decoder = if self.metaspace_decoder {
            json!({"type": "Metaspace", "replacement": "\u{2581}", "prepend_scheme": "always", "split": true})
        } else {
            Value::Null
        };
        json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [added(UNK_ID, "<unk>"), added(BOS_ID, "<s>"), added(EOS_ID, "</s>")],
            "normalizer": null,
            "pre_tokenizer": {"type": "WhitespaceSplit"},
            "post_processor": post_processor,
            "decoder": decoder,
            "model": {"type": "WordLevel", "vocab": vocab_map, "unk_token": "<unk>"}
        })
        .to_string()
    }
}

/// A checkpoint directory named `name` inside a fresh temp dir.
pub struct Checkpoint {
    _tmp: TempDir,
    path: PathBuf,
}

impl Checkpoint {
    pub fn new(name: &str) -> Self {
        let tmp = tempfile::tempdir().expect("Failed to create temp directory");
        let path = tmp.path().join(name);
        std::fs::create_dir(&path).expect("Failed to create checkpoint directory");
        Self { _tmp: tmp, path }
    }

    /// `tokenizer.json` + `tokenizer_config.json`: a byte-pair style checkpoint.
    pub fn bpe(name: &str, tokenizer: TokenizerJson, tokenizer_config: Value) -> Self {
        Self::new(name)
            .with_file("tokenizer.json", &tokenizer.render())
            .with_file("tokenizer_config.json", &tokenizer_config.to_string())
    }

    pub fn with_file(self, file: &str, contents: &str) -> Self {
        std::fs::write(self.path.join(file), contents).expect("Failed to write fixture file");
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
