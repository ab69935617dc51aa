//! Bytepair-training - BPE training infrastructure
//!
//! This crate provides the training loop and pair-frequency counting used to
//! learn BPE merge rules from text data.
//!
//! # Example
//!
//! ```rust
//! use bytepair_training::{BpeTrainer, TrainingConfig};
//!
//! let config = TrainingConfig {
//!     vocab_size: 300,
//!     min_frequency: 2,
//! };
//!
//! let mut trainer = BpeTrainer::new(config);
//! let merges = trainer.train(&["some training text, some training text"])?;
//! # Ok::<(), bytepair_core::TokenizerError>(())
//! ```

pub use bytepair_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{accumulate_pairs, count_corpus, count_pairs, BpeTrainer, PairCounts, TrainingConfig};
