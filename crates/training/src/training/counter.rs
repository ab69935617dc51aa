//! Pair counting for BPE training.
//!
//! Counting is a pure accumulation: callers pass the accumulator in and get
//! the totals back, nothing is retained between calls. Counts are raw
//! frequencies and are never normalized.

use ahash::AHashMap;
use bytepair_core::Pair;

/// Aggregate pair frequencies: pair -> count.
pub type PairCounts = AHashMap<Pair, u64>;

/// Count every adjacent ordered pair in `sequence` into `counts`.
///
/// Passing the same accumulator for several sequences sums frequencies
/// across them; document boundaries contribute no pair.
pub fn accumulate_pairs(sequence: &[u32], counts: &mut PairCounts) {
    for window in sequence.windows(2) {
        *counts.entry((window[0], window[1])).or_insert(0) += 1;
    }
}

/// Count the pairs of a single sequence into a fresh accumulator.
pub fn count_pairs(sequence: &[u32]) -> PairCounts {
    let mut counts = PairCounts::new();
    accumulate_pairs(sequence, &mut counts);
    counts
}

/// Aggregate pair frequencies across every sequence of a corpus.
pub fn count_corpus(sequences: &[Vec<u32>]) -> PairCounts {
    let mut counts = PairCounts::new();
    for sequence in sequences {
        accumulate_pairs(sequence, &mut counts);
    }
    counts
}
