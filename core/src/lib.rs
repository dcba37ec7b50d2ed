pub mod error;
pub mod extract;
pub mod index;
pub mod scan;
pub mod tfidf;
pub mod tokenizer;

pub use error::{ExtractionError, RankError, Result};
pub use index::{Document, RankedResult, TfIdfIndex};

/// Label reported by every scorer response.
pub const ALGORITHM: &str = "TF-IDF Cosine Similarity";
/// Results returned when a search does not say how many.
pub const DEFAULT_TOP_K: usize = 10;
