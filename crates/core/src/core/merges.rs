//! Merge rule management for BPE.
//!
//! Merge rules are stored using token IDs rather than byte strings for fast
//! comparison. Creation order doubles as priority: the table assigns new IDs
//! contiguously from [`BASE_VOCAB_SIZE`], so a smaller ID always means an
//! earlier-learned (higher priority) merge.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A pair of token IDs that can be merged.
pub type Pair = (u32, u32);

/// Number of base (single byte) symbols; IDs below this are leaves.
pub const BASE_VOCAB_SIZE: u32 = 256;

/// Ordered collection of BPE merge rules with efficient lookup.
///
/// Each rule maps an adjacent pair of token IDs to the new token ID it
/// produces. Rules are kept in creation order; rule `i` produces ID
/// `256 + i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeTable {
    /// Lookup: pair -> new token ID
    lookup: AHashMap<Pair, u32>,
    /// Pairs in creation (ascending new-ID) order
    order: Vec<Pair>,
}

impl MergeTable {
    /// Create a new empty merge table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new merge table with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lookup: AHashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// The ID the next recorded merge will receive.
    #[inline]
    pub fn next_id(&self) -> u32 {
        BASE_VOCAB_SIZE + self.order.len() as u32
    }

    /// Record a new merge rule, returning the ID allocated for it.
    ///
    /// Fails if the pair is already present or references an ID that has not
    /// been created yet (both sides must be base bytes or earlier merges).
    pub fn push(&mut self, pair: Pair) -> Result<u32> {
        let new_id = self.next_id();

        if pair.0 >= new_id || pair.1 >= new_id {
            return Err(TokenizerError::InvalidMerge(format!(
                "pair ({}, {}) references an ID not yet created (next is {})",
                pair.0, pair.1, new_id
            )));
        }
        if self.lookup.contains_key(&pair) {
            return Err(TokenizerError::InvalidMerge(format!(
                "pair ({}, {}) is already in the table",
                pair.0, pair.1
            )));
        }

        self.lookup.insert(pair, new_id);
        self.order.push(pair);

        Ok(new_id)
    }

    /// Get the new token ID produced by merging a pair.
    ///
    /// A smaller ID means an earlier-learned, higher-priority merge.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<u32> {
        self.lookup.get(&pair).copied()
    }

    /// Check whether a pair has a merge rule.
    #[inline]
    pub fn contains(&self, pair: Pair) -> bool {
        self.lookup.contains_key(&pair)
    }

    /// The pair that produced a merged ID, if `id` belongs to this table.
    #[inline]
    pub fn pair_for(&self, id: u32) -> Option<Pair> {
        let index = id.checked_sub(BASE_VOCAB_SIZE)? as usize;
        self.order.get(index).copied()
    }

    /// Number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate rules as `(pair, new_id)` in creation (ascending ID) order.
    pub fn iter(&self) -> impl Iterator<Item = (Pair, u32)> + '_ {
        self.order
            .iter()
            .enumerate()
            .map(|(i, &pair)| (pair, BASE_VOCAB_SIZE + i as u32))
    }

    /// The pairs in creation order.
    pub fn pairs(&self) -> &[Pair] {
        &self.order
    }

    /// Rebuild a table from pairs in creation order (e.g. a persisted merge
    /// list). Pair `i` receives ID `256 + i`.
    pub fn from_pairs(pairs: impl IntoIterator<Item = Pair>) -> Result<Self> {
        let mut table = Self::new();
        for pair in pairs {
            table.push(pair)?;
        }
        Ok(table)
    }
}
