//! Vocabulary storage and derivation.
//!
//! The vocabulary maps each token ID to the byte string it stands for. It is
//! always derived from a merge table, never mutated independently, so the
//! mapping is exactly the recursive closure of the merges over the 256 base
//! bytes.

use crate::core::merges::{MergeTable, BASE_VOCAB_SIZE};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Mapping from token ID to its underlying byte string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Token ID -> byte string
    tokens: AHashMap<u32, Vec<u8>>,
}

impl Vocabulary {
    /// Derive the vocabulary for a merge table.
    ///
    /// IDs 0-255 are seeded with their single byte; merged IDs are folded in
    /// ascending creation order, so both constituents of a merge are always
    /// resolved before the merge itself.
    pub fn build(merges: &MergeTable) -> Self {
        let mut tokens = AHashMap::with_capacity(BASE_VOCAB_SIZE as usize + merges.len());

        for byte in 0..BASE_VOCAB_SIZE {
            tokens.insert(byte, vec![byte as u8]);
        }

        for (pair, new_id) in merges.iter() {
            let mut bytes = tokens[&pair.0].clone();
            bytes.extend_from_slice(&tokens[&pair.1]);
            tokens.insert(new_id, bytes);
        }

        Self { tokens }
    }

    /// Get the byte string for a token ID.
    #[inline]
    pub fn get(&self, id: u32) -> Option<&[u8]> {
        self.tokens.get(&id).map(|bytes| bytes.as_slice())
    }

    /// Check whether an ID has a vocabulary entry.
    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.tokens.contains_key(&id)
    }

    /// Number of entries (256 base bytes plus one per merge).
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A derived vocabulary is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Escape control characters in `text` as literal `\u{hex}` sequences.
///
/// Leaves every printable character untouched so escaped output stays
/// readable; applied after lossy UTF-8 recovery, it guarantees that no raw
/// control byte reaches terminal or file output.
pub fn escape_control(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_control() {
            escaped.push_str(&format!("\\u{{{:04x}}}", ch as u32));
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

/// Render a token's byte string for display: lossy UTF-8 with control
/// characters escaped. Used by the diagnostic vocabulary listing.
pub fn render_token(bytes: &[u8]) -> String {
    escape_control(&String::from_utf8_lossy(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_empty_table() {
        let vocab = Vocabulary::build(&MergeTable::new());

        assert_eq!(vocab.len(), 256);
        assert_eq!(vocab.get(0), Some(&[0u8][..]));
        assert_eq!(vocab.get(255), Some(&[255u8][..]));
        assert_eq!(vocab.get(256), None);
    }

    #[test]
    fn test_build_resolves_chained_merges() {
        let mut merges = MergeTable::new();
        merges.push((97, 97)).unwrap(); // 256 = "aa"
        merges.push((97, 98)).unwrap(); // 257 = "ab"
        merges.push((256, 257)).unwrap(); // 258 = "aaab"

        let vocab = Vocabulary::build(&merges);
        assert_eq!(vocab.get(256), Some(&b"aa"[..]));
        assert_eq!(vocab.get(257), Some(&b"ab"[..]));
        assert_eq!(vocab.get(258), Some(&b"aaab"[..]));
        assert_eq!(vocab.len(), 259);
    }

    #[test]
    fn test_escape_control() {
        assert_eq!(escape_control("plain"), "plain");
        assert_eq!(escape_control("a\nb"), "a\\u{000a}b");
        assert_eq!(escape_control("\t"), "\\u{0009}");
    }

    #[test]
    fn test_render_token_invalid_utf8() {
        // 0xff is not valid UTF-8; lossy decoding yields the replacement
        // character, which is printable and left unescaped.
        assert_eq!(render_token(&[0xff]), "\u{fffd}");
    }
}
