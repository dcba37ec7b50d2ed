use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the ranking engine and its file collaborators.
#[derive(Debug, Error)]
pub enum RankError {
    /// Missing or malformed caller input (empty corpus, empty query, mismatched arrays).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A search was attempted before any corpus was loaded.
    #[error("index not built, load a corpus first")]
    IndexNotBuilt,
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Failure to turn a source file into text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("unsupported file format: {0}")]
    Unsupported(PathBuf),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RankError>;
