//! Bytepair-core - Core BPE algorithm implementation
//!
//! This crate provides the fundamental data structures and algorithms for
//! byte-pair encoding (BPE): the ordered merge table, single-pass pair
//! substitution, vocabulary derivation, and the encoder/decoder that apply
//! a frozen model to new data.
//!
//! # Example
//!
//! ```rust
//! use bytepair_core::{Encoder, MergeTable};
//! use std::sync::Arc;
//!
//! let mut merges = MergeTable::new();
//! merges.push((104, 105)).unwrap(); // "hi" -> one token
//!
//! let encoder = Encoder::new(Arc::new(merges));
//! assert_eq!(encoder.encode("hi"), vec![256]);
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE algorithm modules
pub mod core;
pub use core::{
    escape_control, merge_pair, render_token, MergeCandidate, MergeTable, Pair, Vocabulary,
    BASE_VOCAB_SIZE,
};

// Encoding/decoding against a frozen model
pub mod encoding;
pub use encoding::{Decoder, Encoder};
