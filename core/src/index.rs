use crate::error::{RankError, Result};
use crate::tfidf::score_corpus;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Number of characters of document text echoed back in a result.
pub const PREVIEW_CHARS: usize = 500;
/// Appended to a preview when the text was cut.
pub const PREVIEW_MARKER: &str = "...";

/// A candidate document. Ids are not required to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    #[serde(rename = "resume_id")]
    pub id: String,
    #[serde(rename = "similarity_score")]
    pub score: f64,
    /// 1-based position in the returned list
    pub rank: usize,
    #[serde(rename = "resume_text")]
    pub preview: String,
}

/// In-memory TF-IDF index over a corpus snapshot.
///
/// `build_index` swaps in a new snapshot; a `search` already running keeps
/// scoring the snapshot it started with. Share it across threads with `Arc`.
pub struct TfIdfIndex {
    corpus: RwLock<Arc<[Document]>>,
}

impl Default for TfIdfIndex {
    fn default() -> Self { Self::new() }
}

impl TfIdfIndex {
    pub fn new() -> Self {
        Self { corpus: RwLock::new(Arc::from(Vec::new())) }
    }

    /// Replace the stored corpus with `documents`.
    pub fn build_index(&self, documents: Vec<Document>) -> Result<()> {
        if documents.is_empty() {
            return Err(RankError::InvalidInput("no documents provided".into()));
        }
        let count = documents.len();
        *self.corpus.write() = documents.into();
        tracing::info!(count, "built text index");
        Ok(())
    }

    /// Build from parallel text and id arrays, pairing them by position.
    pub fn build_index_from_parallel(&self, texts: Vec<String>, ids: Vec<String>) -> Result<()> {
        if texts.is_empty() || ids.is_empty() {
            return Err(RankError::InvalidInput("resume_texts and resume_ids required".into()));
        }
        if texts.len() != ids.len() {
            return Err(RankError::InvalidInput(
                "resume_texts and resume_ids length mismatch".into(),
            ));
        }
        let documents = ids
            .into_iter()
            .zip(texts)
            .map(|(id, text)| Document { id, text })
            .collect();
        self.build_index(documents)
    }

    pub fn len(&self) -> usize { self.corpus.read().len() }

    pub fn is_empty(&self) -> bool { self.corpus.read().is_empty() }

    /// Current corpus, shared with the index.
    pub fn snapshot(&self) -> Arc<[Document]> { Arc::clone(&self.corpus.read()) }

    /// Rank every indexed document against `query` and keep the best `top_k`.
    ///
    /// Equal scores keep corpus order. A `top_k` past the corpus size returns
    /// the whole corpus.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<RankedResult>> {
        let corpus = self.snapshot();
        if corpus.is_empty() {
            return Err(RankError::IndexNotBuilt);
        }
        if query.is_empty() {
            return Err(RankError::InvalidInput("jd_text required".into()));
        }

        let texts: Vec<&str> = corpus.iter().map(|d| d.text.as_str()).collect();
        let scores = score_corpus(query, &texts);

        let mut scored: Vec<(&Document, f64)> = corpus.iter().zip(scores).collect();
        // stable: ties stay in insertion order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let results: Vec<RankedResult> = scored
            .into_iter()
            .take(top_k)
            .enumerate()
            .map(|(i, (doc, score))| RankedResult {
                id: doc.id.clone(),
                score,
                rank: i + 1,
                preview: preview(&doc.text),
            })
            .collect();
        tracing::debug!(corpus = corpus.len(), returned = results.len(), "search complete");
        Ok(results)
    }
}

/// First `PREVIEW_CHARS` characters of `text`, marked when truncated.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], PREVIEW_MARKER),
        None => text.to_string(),
    }
}
