use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort loading a dataset.
///
/// Individual cells never produce an error: they coerce to their field's
/// fallback value instead (see [`crate::data::Coercion`]).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data source {path:?} was not found")]
    SourceNotFound { path: PathBuf },
    #[error("data source {path:?} could not be parsed: {reason}")]
    MalformedSource { path: PathBuf, reason: String },
}

impl LoadError {
    pub fn malformed(path: &std::path::Path, reason: impl Into<String>) -> Self {
        LoadError::MalformedSource {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::SourceNotFound { path } | LoadError::MalformedSource { path, .. } => path,
        }
    }
}
