//! Core BPE data structures and algorithms.
//!
//! This module contains the fundamental pieces of byte-pair encoding:
//! merge rules, pair substitution, candidate ordering, and the derived
//! vocabulary.

pub mod merger;
pub mod merges;
pub mod priority;
pub mod vocab;

pub use merger::merge_pair;
pub use merges::{MergeTable, Pair, BASE_VOCAB_SIZE};
pub use priority::MergeCandidate;
pub use vocab::{escape_control, render_token, Vocabulary};
