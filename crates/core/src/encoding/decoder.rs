//! Token-ID decoding back to text.

use crate::core::vocab::{escape_control, Vocabulary};
use crate::error::{Result, TokenizerError};
use std::sync::Arc;

/// Reassembles text from token IDs via a frozen vocabulary.
///
/// Like [`Encoder`](crate::Encoder), the decoder only reads its shared
/// state and is safe to use from multiple callers concurrently.
#[derive(Debug, Clone)]
pub struct Decoder {
    vocab: Arc<Vocabulary>,
}

impl Decoder {
    /// Create a decoder over a frozen vocabulary.
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab }
    }

    /// The vocabulary this decoder resolves IDs against.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Concatenate the byte strings of `ids` in order.
    ///
    /// This is the raw reassembly with no text recovery applied; callers
    /// that need exact bytes (round-trip checks, binary corpora) use this
    /// directly.
    pub fn decode_bytes(&self, ids: &[u32]) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(ids.len());

        for &id in ids {
            let token = self
                .vocab
                .get(id)
                .ok_or(TokenizerError::UnknownTokenId(id))?;
            bytes.extend_from_slice(token);
        }

        Ok(bytes)
    }

    /// Decode token IDs to text.
    ///
    /// The concatenated bytes are decoded as UTF-8 with lossy replacement:
    /// merged tokens may split multi-byte characters, and an arbitrary ID
    /// sequence need not reassemble into valid UTF-8 at all, so malformed
    /// byte runs become U+FFFD rather than an error. Control characters are
    /// then escaped to `\u{hex}` so none reach the output raw. The only
    /// failure is an ID with no vocabulary entry.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        let bytes = self.decode_bytes(ids)?;
        Ok(escape_control(&String::from_utf8_lossy(&bytes)))
    }

    /// Decode a batch of ID sequences, one string per sequence, order
    /// preserved.
    pub fn decode_batch<S: AsRef<[u32]>>(&self, sequences: &[S]) -> Result<Vec<String>> {
        sequences
            .iter()
            .map(|ids| self.decode(ids.as_ref()))
            .collect()
    }
}
