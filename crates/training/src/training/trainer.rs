//! BPE trainer implementation.
//!
//! Trains a merge table from text data by iteratively merging the most
//! frequent adjacent pair across the whole corpus.

use super::counter::count_corpus;
use bytepair_core::{
    merge_pair, MergeCandidate, MergeTable, Result, TokenizerError, BASE_VOCAB_SIZE,
};

/// Configuration for BPE training.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Target vocabulary size (256 base bytes + learned merges)
    pub vocab_size: usize,
    /// Minimum frequency for a pair to be merged
    pub min_frequency: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: 30_000,
            min_frequency: 2,
        }
    }
}

/// BPE trainer.
///
/// Owns its working corpus and counters for the duration of a `train` call;
/// the returned merge table is an immutable value ready to hand to the
/// encoder and vocabulary builder.
pub struct BpeTrainer {
    config: TrainingConfig,
    merges: MergeTable,
}

impl BpeTrainer {
    /// Create a new trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            merges: MergeTable::new(),
        }
    }

    /// Create a trainer with default configuration and the given target
    /// vocabulary size.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self::new(TrainingConfig {
            vocab_size,
            ..Default::default()
        })
    }

    /// Create a trainer that resumes from an existing merge table.
    ///
    /// The loaded merges keep their IDs; only newly learned merges count
    /// toward the vocabulary-size budget.
    pub fn with_merges(config: TrainingConfig, merges: MergeTable) -> Self {
        Self { config, merges }
    }

    /// Train on a corpus of documents and return the merge table.
    ///
    /// Each document becomes its own ID sequence (no pair spans a document
    /// boundary) while frequencies are aggregated globally. Every round
    /// selects the most frequent pair ([`MergeCandidate`]'s total order
    /// breaks frequency ties toward the lexicographically smaller pair),
    /// stops once the winner falls below `min_frequency`, rewrites every
    /// document, and recounts from scratch: a merge invalidates the counts
    /// of every pair straddling a merge site, so the table cannot simply be
    /// patched.
    ///
    /// A corpus with fewer than two bytes in total trains to an empty table
    /// rather than erroring.
    pub fn train<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<MergeTable> {
        if self.config.vocab_size < BASE_VOCAB_SIZE as usize {
            return Err(TokenizerError::InvalidConfig(format!(
                "target vocabulary size {} is below the {} base byte symbols",
                self.config.vocab_size, BASE_VOCAB_SIZE
            )));
        }
        let target_merges = self.config.vocab_size - BASE_VOCAB_SIZE as usize;

        let mut corpus: Vec<Vec<u32>> = documents
            .iter()
            .map(|doc| doc.as_ref().bytes().map(u32::from).collect())
            .collect();
        let mut counts = count_corpus(&corpus);

        while self.merges.len() < target_merges {
            let best = counts
                .iter()
                .map(|(&pair, &count)| MergeCandidate::new(pair, count))
                .max();

            let Some(candidate) = best else { break };
            if candidate.count < self.config.min_frequency {
                break;
            }

            // A pair already in the table can only win when resuming from a
            // loaded model and the corpus reproduces a historical pair: its
            // ID is reused and the new-merge budget is untouched.
            let new_id = match self.merges.get(candidate.pair) {
                Some(id) => id,
                None => self.merges.push(candidate.pair)?,
            };

            for sequence in &mut corpus {
                *sequence = merge_pair(sequence, candidate.pair, new_id);
            }
            counts = count_corpus(&corpus);
        }

        Ok(self.merges.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytepair_core::Vocabulary;

    #[test]
    fn test_rejects_vocab_size_below_base() {
        let mut trainer = BpeTrainer::with_vocab_size(255);
        let err = trainer.train(&["some text"]).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidConfig(_)));
    }

    #[test]
    fn test_tiny_corpus_trains_to_empty_table() {
        let mut trainer = BpeTrainer::with_vocab_size(300);
        assert!(trainer.train(&["a"]).unwrap().is_empty());

        let mut trainer = BpeTrainer::with_vocab_size(300);
        assert!(trainer.train(&[""; 0]).unwrap().is_empty());
    }

    #[test]
    fn test_first_merge_is_most_frequent_pair() {
        // "aaabdaaabac": (a,a) occurs 4 times, strictly more than any
        // other pair, so it becomes merge 256.
        let mut trainer = BpeTrainer::with_vocab_size(259);
        let merges = trainer.train(&["aaabdaaabac"]).unwrap();

        assert_eq!(merges.get((97, 97)), Some(256));
    }

    #[test]
    fn test_training_scenario_full_merge_sequence() {
        let mut trainer = BpeTrainer::with_vocab_size(259);
        let merges = trainer.train(&["aaabdaaabac"]).unwrap();

        // Recounting after each merge: (a,a)->256, then the tie between
        // (256,a) and (a,b) at frequency 2 resolves to the smaller pair
        // (a,b)->257, then (256,257)->258.
        assert_eq!(merges.len(), 3);
        assert_eq!(merges.get((97, 97)), Some(256));
        assert_eq!(merges.get((97, 98)), Some(257));
        assert_eq!(merges.get((256, 257)), Some(258));
    }

    #[test]
    fn test_stops_below_min_frequency() {
        // Every pair in "abcd" occurs exactly once; nothing merges.
        let mut trainer = BpeTrainer::with_vocab_size(300);
        let merges = trainer.train(&["abcd"]).unwrap();
        assert!(merges.is_empty());
    }

    #[test]
    fn test_respects_vocab_size_budget() {
        let mut trainer = BpeTrainer::with_vocab_size(257);
        let merges = trainer.train(&["ababab ababab"]).unwrap();
        assert_eq!(merges.len(), 1);
    }

    #[test]
    fn test_training_is_deterministic() {
        let corpus = ["the cat sat on the mat", "the bat ate the rat"];

        let mut first = BpeTrainer::with_vocab_size(280);
        let mut second = BpeTrainer::with_vocab_size(280);

        assert_eq!(
            first.train(&corpus).unwrap(),
            second.train(&corpus).unwrap()
        );
    }

    #[test]
    fn test_frequencies_aggregate_across_documents() {
        // (a,b) appears once per document; only globally is it frequent.
        let mut trainer = BpeTrainer::with_vocab_size(257);
        let merges = trainer.train(&["xab", "yab", "zab"]).unwrap();

        assert_eq!(merges.get((97, 98)), Some(256));
    }

    #[test]
    fn test_no_pair_spans_document_boundary() {
        // "a" | "a" never forms the pair (a,a).
        let mut trainer = BpeTrainer::with_vocab_size(300);
        let merges = trainer.train(&["a", "a", "a", "a"]).unwrap();
        assert!(merges.is_empty());
    }

    #[test]
    fn test_resume_reuses_id_without_consuming_budget() {
        let mut first = BpeTrainer::with_vocab_size(257);
        let table = first.train(&["abababab"]).unwrap();
        assert_eq!(table.get((97, 98)), Some(256));

        // Resume on a corpus that reproduces the historical pair; (a,b) is
        // re-applied with its old ID and one *new* merge still fits the
        // budget of a single additional slot.
        let config = TrainingConfig {
            vocab_size: 258,
            ..Default::default()
        };
        let mut resumed = BpeTrainer::with_merges(config, table);
        let merges = resumed.train(&["abab abab"]).unwrap();

        assert_eq!(merges.get((97, 98)), Some(256));
        assert_eq!(merges.len(), 2);
    }

    #[test]
    fn test_vocabulary_size_bound() {
        let mut trainer = BpeTrainer::with_vocab_size(400);
        let merges = trainer.train(&["to be or not to be"]).unwrap();
        let vocab = Vocabulary::build(&merges);

        assert!(vocab.len() >= 256);
        assert_eq!(vocab.len(), 256 + merges.len());
        assert!(vocab.len() <= 400);
    }
}
