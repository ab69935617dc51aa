//! Load functionality for persisted models.

use super::format::ModelFile;
use bytepair_core::{MergeTable, Result, TokenizerError, Vocabulary};
use std::path::Path;

/// A model reconstructed from disk.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    /// Opaque splitting-pattern string, as persisted
    pub pattern: String,
    /// Merge table with IDs 256, 257, ... assigned in file order
    pub merges: MergeTable,
    /// Vocabulary rederived from the merge table
    pub vocab: Vocabulary,
}

/// Model loader - reads a `.model` file back into a usable model.
pub struct ModelLoader;

impl ModelLoader {
    /// Load a model file.
    ///
    /// Merge lines receive IDs in file order (`256 + line index`); the
    /// vocabulary is rebuilt from the table rather than read from disk. A
    /// merge line referencing an ID the file has not yet produced is a
    /// format error.
    pub fn load(path: &Path) -> Result<LoadedModel> {
        let contents = std::fs::read_to_string(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        let model = ModelFile::parse(&contents)?;

        let merges = MergeTable::from_pairs(model.merges).map_err(|err| {
            TokenizerError::Format(format!("{}: invalid merge list: {}", path.display(), err))
        })?;
        let vocab = Vocabulary::build(&merges);

        Ok(LoadedModel {
            pattern: model.pattern,
            merges,
            vocab,
        })
    }
}
