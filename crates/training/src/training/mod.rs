//! Training infrastructure for BPE tokenizers.

pub mod counter;
pub mod trainer;

pub use counter::{accumulate_pairs, count_corpus, count_pairs, PairCounts};
pub use trainer::{BpeTrainer, TrainingConfig};
