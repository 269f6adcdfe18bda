//! SentencePiece tokenizer support

#[cfg(feature = "spm")]
use crate::{Result, TokenizerBackend, TokenizerError};
#[cfg(feature = "spm")]
use prost::Message;
#[cfg(feature = "spm")]
use std::path::Path;

/// Leading field of `ModelProto`: the piece table, in id order.
#[cfg(feature = "spm")]
#[derive(Clone, PartialEq, Message)]
struct ModelPieces {
    #[prost(message, repeated, tag = "1")]
    pieces: Vec<ModelPiece>,
}

#[cfg(feature = "spm")]
#[derive(Clone, PartialEq, Message)]
struct ModelPiece {
    #[prost(string, optional, tag = "1")]
    piece: Option<String>,
}

/// Unigram style backend backed by a SentencePiece `tokenizer.model`.
#[cfg(feature = "spm")]
pub struct SpmBackend {
    inner: sentencepiece::SentencePieceProcessor,
    unk_piece: Option<String>,
}

#[cfg(feature = "spm")]
impl SpmBackend {
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(TokenizerError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "model file not found"),
            });
        }
        let inner = sentencepiece::SentencePieceProcessor::open(path).map_err(|e| {
            TokenizerError::backend(format!("failed to load {}: {e}", path.display()))
        })?;
        let unk_piece = unknown_piece(&inner);
        Ok(Self { inner, unk_piece })
    }
}

/// Surface form of the model's unknown piece (`<unk>` unless trained
/// otherwise).
#[cfg(feature = "spm")]
fn unknown_piece(inner: &sentencepiece::SentencePieceProcessor) -> Option<String> {
    let proto = inner.to_serialized_proto();
    match ModelPieces::decode(proto.as_slice()) {
        Ok(model) => model.pieces.into_iter().nth(inner.unk_id() as usize).and_then(|p| p.piece),
        Err(e) => {
            tracing::warn!("could not read piece table from tokenizer.model: {e}");
            None
        }
    }
}

#[cfg(feature = "spm")]
impl TokenizerBackend for SpmBackend {
    fn vocab_size(&self) -> usize {
        self.inner.len()
    }

    fn token_to_id(&self, token: &str) -> Result<u32> {
        let id = self
            .inner
            .piece_to_id(token)
            .map_err(|e| TokenizerError::backend(format!("piece lookup error: {e}")))?;
        match id {
            Some(id) => Ok(id),
            // piece_to_id reports the unknown piece itself as missing
            None if self.unk_piece.as_deref() == Some(token) => Ok(self.inner.unk_id()),
            None => Err(TokenizerError::UnknownToken { token: token.to_string() }),
        }
    }

    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let pieces = self
            .inner
            .encode(text)
            .map_err(|e| TokenizerError::backend(format!("encode error: {e}")))?;
        Ok(pieces.into_iter().map(|p| p.id).collect())
    }

    fn decode(&self, tokens: &[u32]) -> Result<String> {
        self.inner
            .decode_piece_ids(tokens)
            .map_err(|e| TokenizerError::backend(format!("decode error: {e}")))
    }

    fn intrinsic_bos_id(&self) -> Option<u32> {
        self.inner.bos_id()
    }

    fn intrinsic_eos_id(&self) -> Option<u32> {
        self.inner.eos_id()
    }
}
