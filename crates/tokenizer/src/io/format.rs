//! Model file format.
//!
//! A saved model is a deterministic line-oriented text file:
//!
//! ```text
//! bpe v1                  version tag
//! <pattern>               opaque splitting pattern, one line (may be empty)
//! <merge-count>
//! <left-id> <right-id>    one line per merge, ascending new-ID order
//! ```
//!
//! The merge list alone reconstructs the table because line order equals
//! creation order: line `i` holds the pair that produced ID `256 + i`. The
//! vocabulary is never stored; it is rederived on load.

use bytepair_core::{Pair, Result, TokenizerError};

/// Version tag expected on the first line of a model file.
pub const MODEL_VERSION: &str = "bpe v1";

/// Parsed (or to-be-rendered) contents of a model file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFile {
    /// Opaque splitting-pattern string, persisted verbatim
    pub pattern: String,
    /// Merge pairs in creation order
    pub merges: Vec<Pair>,
}

impl ModelFile {
    /// Render to the textual model format.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n{}\n{}\n", MODEL_VERSION, self.pattern, self.merges.len());
        for (left, right) in &self.merges {
            out.push_str(&format!("{} {}\n", left, right));
        }
        out
    }

    /// Parse the textual model format.
    ///
    /// Strict: the version tag must match, the pattern and count lines must
    /// be present, exactly `count` merge lines of two integer fields must
    /// follow, and nothing may trail them.
    pub fn parse(input: &str) -> Result<Self> {
        let mut lines = input.lines();

        let version = lines
            .next()
            .ok_or_else(|| TokenizerError::Format("empty model file".to_string()))?;
        if version != MODEL_VERSION {
            return Err(TokenizerError::Format(format!(
                "unsupported model version '{}' (expected '{}')",
                version, MODEL_VERSION
            )));
        }

        let pattern = lines
            .next()
            .ok_or_else(|| TokenizerError::Format("missing pattern line".to_string()))?
            .to_string();

        let count_line = lines
            .next()
            .ok_or_else(|| TokenizerError::Format("missing merge-count line".to_string()))?;
        let count: usize = count_line.trim().parse().map_err(|_| {
            TokenizerError::Format(format!("invalid merge count '{}'", count_line))
        })?;

        let mut merges = Vec::with_capacity(count);
        for index in 0..count {
            let line = lines.next().ok_or_else(|| {
                TokenizerError::Format(format!(
                    "truncated merge list: expected {} merges, found {}",
                    count, index
                ))
            })?;
            merges.push(Self::parse_merge_line(line, index)?);
        }

        if lines.next().is_some() {
            return Err(TokenizerError::Format(format!(
                "trailing data after {} merges",
                count
            )));
        }

        Ok(Self { pattern, merges })
    }

    fn parse_merge_line(line: &str, index: usize) -> Result<Pair> {
        let mut fields = line.split_whitespace();
        let (Some(left), Some(right), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(TokenizerError::Format(format!(
                "merge line {} has wrong field count: '{}'",
                index, line
            )));
        };

        let parse_id = |field: &str| {
            field.parse::<u32>().map_err(|_| {
                TokenizerError::Format(format!(
                    "merge line {} has invalid token ID '{}'",
                    index, field
                ))
            })
        };

        Ok((parse_id(left)?, parse_id(right)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ModelFile {
        ModelFile {
            pattern: r"\s+".to_string(),
            merges: vec![(97, 97), (256, 98)],
        }
    }

    #[test]
    fn test_render_parse_roundtrip() {
        let model = sample();
        assert_eq!(ModelFile::parse(&model.render()).unwrap(), model);
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(
            sample().render(),
            "bpe v1\n\\s+\n2\n97 97\n256 98\n"
        );
    }

    #[test]
    fn test_empty_pattern_roundtrip() {
        let model = ModelFile {
            pattern: String::new(),
            merges: vec![],
        };
        assert_eq!(ModelFile::parse(&model.render()).unwrap(), model);
    }

    #[test]
    fn test_rejects_wrong_version() {
        let err = ModelFile::parse("bpe v2\n\n0\n").unwrap_err();
        assert!(matches!(err, TokenizerError::Format(_)));
    }

    #[test]
    fn test_rejects_truncated_merge_list() {
        let err = ModelFile::parse("bpe v1\n\n2\n97 97\n").unwrap_err();
        assert!(matches!(err, TokenizerError::Format(_)));
    }

    #[test]
    fn test_rejects_wrong_field_count() {
        let err = ModelFile::parse("bpe v1\n\n1\n97 97 97\n").unwrap_err();
        assert!(matches!(err, TokenizerError::Format(_)));

        let err = ModelFile::parse("bpe v1\n\n1\n97\n").unwrap_err();
        assert!(matches!(err, TokenizerError::Format(_)));
    }

    #[test]
    fn test_rejects_non_numeric_id() {
        let err = ModelFile::parse("bpe v1\n\n1\na b\n").unwrap_err();
        assert!(matches!(err, TokenizerError::Format(_)));
    }

    #[test]
    fn test_rejects_trailing_data() {
        let err = ModelFile::parse("bpe v1\n\n1\n97 97\n98 98\n").unwrap_err();
        assert!(matches!(err, TokenizerError::Format(_)));
    }

    #[test]
    fn test_rejects_empty_input() {
        let err = ModelFile::parse("").unwrap_err();
        assert!(matches!(err, TokenizerError::Format(_)));
    }
}
