//! Greedy BPE encoding.
//!
//! The encoder re-applies learned merges to new text in the order they were
//! learned, so token boundaries come out identical to those produced while
//! training.

use crate::core::merger::merge_pair;
use crate::core::merges::MergeTable;
use std::sync::Arc;

/// Applies a frozen merge table to text.
///
/// The table is shared via `Arc` and never mutated, so one encoder can be
/// used from any number of callers concurrently.
#[derive(Debug, Clone)]
pub struct Encoder {
    merges: Arc<MergeTable>,
}

impl Encoder {
    /// Create an encoder over a frozen merge table.
    pub fn new(merges: Arc<MergeTable>) -> Self {
        Self { merges }
    }

    /// The merge table this encoder applies.
    pub fn merges(&self) -> &MergeTable {
        &self.merges
    }

    /// Encode text to token IDs.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.encode_ids(text.bytes().map(u32::from).collect())
    }

    /// Apply the merge table to a byte-ID sequence.
    ///
    /// Each round picks, among the adjacent pairs currently present, the one
    /// with the smallest new ID (the earliest-learned merge) and substitutes
    /// every occurrence in a single pass. Stops once no present pair has a
    /// rule. Sequences shorter than two IDs come back unchanged.
    pub fn encode_ids(&self, mut ids: Vec<u32>) -> Vec<u32> {
        while ids.len() >= 2 {
            let best = ids
                .windows(2)
                .filter_map(|w| {
                    let pair = (w[0], w[1]);
                    self.merges.get(pair).map(|new_id| (pair, new_id))
                })
                .min_by_key(|&(_, new_id)| new_id);

            match best {
                Some((pair, new_id)) => ids = merge_pair(&ids, pair, new_id),
                None => break,
            }
        }

        ids
    }

    /// Encode a batch of text units, one ID sequence per unit, order
    /// preserved.
    pub fn encode_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Vec<u32>> {
        texts.iter().map(|text| self.encode(text.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::merges::MergeTable;

    fn encoder(pairs: &[(u32, u32)]) -> Encoder {
        let merges = MergeTable::from_pairs(pairs.iter().copied()).unwrap();
        Encoder::new(Arc::new(merges))
    }

    #[test]
    fn test_encode_without_merges() {
        let encoder = encoder(&[]);
        assert_eq!(encoder.encode("ab"), vec![97, 98]);
    }

    #[test]
    fn test_encode_short_input_unchanged() {
        let encoder = encoder(&[(97, 98)]);
        assert_eq!(encoder.encode(""), Vec::<u32>::new());
        assert_eq!(encoder.encode("a"), vec![97]);
    }

    #[test]
    fn test_earlier_merge_has_priority() {
        // (a,b) was learned before (b,c); in "abbc" both are present and
        // the earlier rule must fire first.
        let encoder = encoder(&[(97, 98), (98, 99)]);
        assert_eq!(encoder.encode("abbc"), vec![256, 257]);
    }

    #[test]
    fn test_encode_reproduces_training_boundaries() {
        // Merge table trained on "aaabdaaabac" (target 259).
        let encoder = encoder(&[(97, 97), (97, 98), (256, 257)]);
        assert_eq!(
            encoder.encode("aaabdaaabac"),
            vec![258, 100, 258, 97, 99]
        );
    }

    #[test]
    fn test_encode_cascades_through_merge_chain() {
        let encoder = encoder(&[(97, 97), (256, 256)]);
        // "aaaa" -> [256, 256] -> [257]
        assert_eq!(encoder.encode("aaaa"), vec![257]);
    }

    #[test]
    fn test_encode_batch_preserves_order() {
        let encoder = encoder(&[(97, 98)]);
        let batches = encoder.encode_batch(&["ab", "ba", "abab"]);
        assert_eq!(
            batches,
            vec![vec![256], vec![98, 97], vec![256, 256]]
        );
    }
}
