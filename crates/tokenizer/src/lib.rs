//! Bytepair-tokenizer - High-level tokenizer API
//!
//! This crate provides a user-friendly interface for BPE tokenization,
//! integrating the core components (merge table, vocabulary, encoder,
//! decoder, trainer) into a single API with model persistence.
//!
//! # Example
//!
//! ```rust
//! use bytepair_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder().vocab_size(300).build()?;
//! tokenizer.train(&["a corpus of text, a corpus of text"])?;
//!
//! let ids = tokenizer.encode("a corpus");
//! assert_eq!(tokenizer.decode(&ids)?, "a corpus");
//! # Ok::<(), bytepair_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use bytepair_core::{MergeTable, Result, TokenizerError, Vocabulary};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerConfig};

// IO/Serialization
pub mod io;
pub use io::{LoadedModel, ModelFile, ModelLoader, ModelSaver, MODEL_VERSION};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::Splitter;
