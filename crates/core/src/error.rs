//! Error types for the BPE tokenizer library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Invalid configuration (target vocabulary below 256, bad pattern, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed or unsupported model file
    #[error("Model format error: {0}")]
    Format(String),

    /// Decode was given an ID with no vocabulary entry
    #[error("Unknown token ID: {0}")]
    UnknownTokenId(u32),

    /// Merge rule violating the merge-table invariants
    #[error("Invalid merge rule: {0}")]
    InvalidMerge(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
