//! Save functionality for trained models.

use super::format::ModelFile;
use bytepair_core::{render_token, MergeTable, Result, TokenizerError, Vocabulary};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Model saver - writes a trained model (and its diagnostic vocabulary
/// listing) to disk.
pub struct ModelSaver<'a> {
    /// Opaque splitting-pattern string
    pattern: &'a str,
    /// Merge rules reference
    merges: &'a MergeTable,
    /// Derived vocabulary reference
    vocab: &'a Vocabulary,
}

impl<'a> ModelSaver<'a> {
    /// Create a new model saver borrowing the model parts.
    pub fn new(pattern: &'a str, merges: &'a MergeTable, vocab: &'a Vocabulary) -> Self {
        Self {
            pattern,
            merges,
            vocab,
        }
    }

    /// Write `<stem>.model` and return its path.
    ///
    /// The file is everything needed to reload the model: version tag,
    /// pattern, and the ordered merge list.
    pub fn save(&self, stem: &Path) -> Result<PathBuf> {
        if self.pattern.contains('\n') {
            return Err(TokenizerError::Format(
                "splitting pattern must not contain newlines".to_string(),
            ));
        }

        let model = ModelFile {
            pattern: self.pattern.to_string(),
            merges: self.merges.pairs().to_vec(),
        };

        let path = stem.with_extension("model");
        std::fs::write(&path, model.render()).map_err(|err| TokenizerError::Io {
            path: path.clone(),
            err,
        })?;

        Ok(path)
    }

    /// Write `<stem>.vocab`, a human-readable listing, and return its path.
    ///
    /// Diagnostic only; load never reads it. Base symbols print as
    /// `[bytes] id`; merged symbols as `[left][right] -> [bytes] id`, with
    /// control and invalid bytes escaped for display.
    pub fn save_vocab(&self, stem: &Path) -> Result<PathBuf> {
        let path = stem.with_extension("vocab");
        let io_err = |err| TokenizerError::Io {
            path: path.clone(),
            err,
        };

        let file = File::create(&path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);

        for id in 0..self.vocab.len() as u32 {
            let bytes = self.vocab.get(id).unwrap_or_default();
            let rendered = render_token(bytes);

            match self.merges.pair_for(id) {
                Some((left, right)) => {
                    let left = render_token(self.vocab.get(left).unwrap_or_default());
                    let right = render_token(self.vocab.get(right).unwrap_or_default());
                    writeln!(writer, "[{}][{}] -> [{}] {}", left, right, rendered, id)
                        .map_err(io_err)?;
                }
                None => writeln!(writer, "[{}] {}", rendered, id).map_err(io_err)?,
            }
        }
        writer.flush().map_err(io_err)?;

        Ok(path)
    }
}
