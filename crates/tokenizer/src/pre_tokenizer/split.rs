//! Regex splitting of raw corpus text.
//!
//! The splitting pattern is opaque to the model: it is persisted verbatim
//! and its dialect is whatever the regex engine accepts. `fancy-regex` is
//! used because the customary language-aware patterns lean on possessive
//! quantifiers and lookahead.

use bytepair_core::{Result, TokenizerError};
use fancy_regex::Regex;

/// Splits raw text into fragments before byte-level processing.
///
/// Each fragment becomes an independent document boundary for training: no
/// merge pair ever spans two fragments, while pair frequencies still
/// aggregate globally.
#[derive(Debug)]
pub struct Splitter {
    pattern: String,
    regex: Regex,
}

impl Splitter {
    /// Compile a splitter from a pattern string.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|err| {
            TokenizerError::InvalidConfig(format!("invalid splitting pattern: {}", err))
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern this splitter was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Split text into the pattern's matches, in order.
    ///
    /// Text between matches is dropped, mirroring the match-based splitting
    /// of the customary patterns (which themselves match everything,
    /// whitespace included).
    pub fn split(&self, text: &str) -> Result<Vec<String>> {
        let mut fragments = Vec::new();

        for found in self.regex.find_iter(text) {
            let found = found.map_err(|err| {
                TokenizerError::InvalidConfig(format!("splitting pattern failed: {}", err))
            })?;
            fragments.push(found.as_str().to_string());
        }

        Ok(fragments)
    }
}
