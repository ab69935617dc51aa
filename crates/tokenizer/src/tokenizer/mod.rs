//! Main tokenizer implementation.
//!
//! `Tokenizer` ties the pieces together: it owns the frozen merge table and
//! vocabulary, the opaque splitting pattern, and the encoder/decoder pair,
//! and it drives training and persistence.

use crate::io::{ModelLoader, ModelSaver};
use crate::pre_tokenizer::Splitter;
use bytepair_core::{Decoder, Encoder, MergeTable, Result, Vocabulary};
use bytepair_training::{BpeTrainer, TrainingConfig};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Configuration for building a tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Target vocabulary size
    pub vocab_size: usize,
    /// Minimum pair frequency for merges during training
    pub min_frequency: u64,
    /// Optional splitting pattern applied to the corpus before training
    pub pattern: Option<String>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            vocab_size: 30_000,
            min_frequency: 2,
            pattern: None,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vocabulary size.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = size;
        self
    }

    /// Set the minimum pair frequency for merges.
    pub fn min_frequency(mut self, freq: u64) -> Self {
        self.config.min_frequency = freq;
        self
    }

    /// Set the splitting pattern applied to the training corpus.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.pattern = Some(pattern.into());
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        Tokenizer::new(self.config)
    }
}

/// Main tokenizer struct.
///
/// Encoding and decoding run against frozen, `Arc`-shared state and may be
/// called concurrently; training and loading replace that state wholesale.
#[derive(Debug)]
pub struct Tokenizer {
    config: TokenizerConfig,
    /// Persisted splitting pattern; empty string means no splitting
    pattern: String,
    merges: Arc<MergeTable>,
    vocab: Arc<Vocabulary>,
    encoder: Encoder,
    decoder: Decoder,
}

impl Tokenizer {
    /// Create a new, untrained tokenizer with the given configuration.
    ///
    /// A configured pattern is compiled once here so a malformed one fails
    /// up front rather than at training time.
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        let pattern = config.pattern.clone().unwrap_or_default();
        if !pattern.is_empty() {
            Splitter::new(&pattern)?;
        }

        Ok(Self::assemble(config, pattern, MergeTable::new()))
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    fn assemble(config: TokenizerConfig, pattern: String, merges: MergeTable) -> Self {
        let vocab = Arc::new(Vocabulary::build(&merges));
        let merges = Arc::new(merges);

        Self {
            config,
            pattern,
            encoder: Encoder::new(merges.clone()),
            decoder: Decoder::new(vocab.clone()),
            merges,
            vocab,
        }
    }

    /// Train on a corpus of documents.
    ///
    /// When a pattern is configured, each document is first fragmented by
    /// it and every fragment becomes an independent sequence; merges never
    /// span fragment boundaries. Training resumes from the tokenizer's
    /// current merge table; the vocabulary, encoder, and decoder are rebuilt
    /// from the result.
    pub fn train<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        let fragments: Vec<String> = if self.pattern.is_empty() {
            documents
                .iter()
                .map(|doc| doc.as_ref().to_string())
                .collect()
        } else {
            let splitter = Splitter::new(&self.pattern)?;
            let mut fragments = Vec::new();
            for doc in documents {
                fragments.extend(splitter.split(doc.as_ref())?);
            }
            fragments
        };

        let training_config = TrainingConfig {
            vocab_size: self.config.vocab_size,
            min_frequency: self.config.min_frequency,
        };
        let mut trainer = BpeTrainer::with_merges(training_config, (*self.merges).clone());
        let merges = trainer.train(&fragments)?;

        *self = Self::assemble(self.config.clone(), self.pattern.clone(), merges);
        Ok(())
    }

    /// Encode text to token IDs.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.encoder.encode(text)
    }

    /// Encode a batch of text units in parallel, order preserved.
    ///
    /// Safe because encoding only reads the frozen merge table.
    pub fn encode_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<Vec<u32>> {
        texts
            .par_iter()
            .map(|text| self.encoder.encode(text.as_ref()))
            .collect()
    }

    /// Decode token IDs back to text.
    ///
    /// Invalid UTF-8 decodes lossily and control characters are escaped;
    /// the only failure is an ID absent from the vocabulary.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        self.decoder.decode(ids)
    }

    /// Decode a batch of ID sequences in parallel, order preserved.
    pub fn decode_batch<S: AsRef<[u32]> + Sync>(&self, sequences: &[S]) -> Result<Vec<String>> {
        sequences
            .par_iter()
            .map(|ids| self.decoder.decode(ids.as_ref()))
            .collect()
    }

    /// Decode token IDs to their exact bytes, with no text recovery.
    pub fn decode_bytes(&self, ids: &[u32]) -> Result<Vec<u8>> {
        self.decoder.decode_bytes(ids)
    }

    /// Save the model as `<stem>.model` plus the `<stem>.vocab` diagnostic
    /// listing; returns the model path.
    pub fn save(&self, stem: &Path) -> Result<PathBuf> {
        let saver = ModelSaver::new(&self.pattern, &self.merges, &self.vocab);
        let model_path = saver.save(stem)?;
        saver.save_vocab(stem)?;
        Ok(model_path)
    }

    /// Load a tokenizer from a `.model` file.
    pub fn load(path: &Path) -> Result<Self> {
        let loaded = ModelLoader::load(path)?;

        let config = TokenizerConfig {
            vocab_size: 256 + loaded.merges.len(),
            pattern: (!loaded.pattern.is_empty()).then(|| loaded.pattern.clone()),
            ..Default::default()
        };

        Ok(Self::assemble(config, loaded.pattern, loaded.merges))
    }

    /// The vocabulary size (256 base bytes plus learned merges).
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// The frozen merge table.
    pub fn merges(&self) -> &MergeTable {
        &self.merges
    }

    /// The derived vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// The persisted splitting pattern ("" when none is configured).
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_stem(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bytepair_tokenizer_{}", name))
    }

    #[test]
    fn test_untrained_tokenizer_passes_bytes_through() {
        let tokenizer = Tokenizer::builder().build().unwrap();

        assert_eq!(tokenizer.vocab_size(), 256);
        assert_eq!(tokenizer.encode("hi"), vec![104, 105]);
        assert_eq!(tokenizer.decode(&[104, 105]).unwrap(), "hi");
    }

    #[test]
    fn test_builder_rejects_bad_pattern() {
        let err = Tokenizer::builder().pattern("(unclosed").build().unwrap_err();
        assert!(matches!(
            err,
            bytepair_core::TokenizerError::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_train_encode_matches_training_application() {
        let mut tokenizer = Tokenizer::builder().vocab_size(259).build().unwrap();
        tokenizer.train(&["aaabdaaabac"]).unwrap();

        assert_eq!(tokenizer.vocab_size(), 259);
        // Encoding the training text reproduces the fully merged corpus.
        assert_eq!(
            tokenizer.encode("aaabdaaabac"),
            vec![258, 100, 258, 97, 99]
        );
    }

    #[test]
    fn test_roundtrip_and_reencode_idempotence() {
        let mut tokenizer = Tokenizer::builder().vocab_size(300).build().unwrap();
        tokenizer
            .train(&["the quick brown fox, the quick brown fox"])
            .unwrap();

        let text = "the quick fox";
        let ids = tokenizer.encode(text);
        let decoded = tokenizer.decode(&ids).unwrap();

        assert_eq!(decoded, text);
        assert_eq!(tokenizer.encode(&decoded), ids);
    }

    #[test]
    fn test_pattern_confines_merges_to_fragments() {
        // With \S+ fragments, no merge can absorb the space: it never
        // appears inside any training sequence.
        let mut tokenizer = Tokenizer::builder()
            .vocab_size(300)
            .pattern(r"\S+")
            .build()
            .unwrap();
        tokenizer.train(&["ab ab ab ab"]).unwrap();

        assert_eq!(tokenizer.merges().get((97, 98)), Some(256));
        for (pair, _) in tokenizer.merges().iter() {
            assert_ne!(pair.0, 32);
            assert_ne!(pair.1, 32);
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut tokenizer = Tokenizer::builder()
            .vocab_size(280)
            .pattern(r"\S+")
            .build()
            .unwrap();
        tokenizer
            .train(&["round and round and round it goes"])
            .unwrap();

        let stem = temp_stem("roundtrip");
        let model_path = tokenizer.save(&stem).unwrap();
        let reloaded = Tokenizer::load(&model_path).unwrap();

        assert_eq!(reloaded.merges(), tokenizer.merges());
        assert_eq!(reloaded.vocab(), tokenizer.vocab());
        assert_eq!(reloaded.pattern(), tokenizer.pattern());

        let text = "round it goes";
        assert_eq!(reloaded.encode(text), tokenizer.encode(text));

        std::fs::remove_file(stem.with_extension("model")).ok();
        std::fs::remove_file(stem.with_extension("vocab")).ok();
    }

    #[test]
    fn test_batch_entry_points_preserve_order() {
        let mut tokenizer = Tokenizer::builder().vocab_size(270).build().unwrap();
        tokenizer.train(&["abab abab"]).unwrap();

        let texts = ["ab", "ba", "abab"];
        let batches = tokenizer.encode_batch(&texts);
        assert_eq!(batches.len(), 3);
        for (ids, text) in batches.iter().zip(texts) {
            assert_eq!(ids, &tokenizer.encode(text));
        }

        let decoded = tokenizer.decode_batch(&batches).unwrap();
        assert_eq!(decoded, vec!["ab", "ba", "abab"]);
    }
}
