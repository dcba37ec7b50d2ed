//! Term statistics and vector-space scoring.
//!
//! Maps are ordered so that every sum (norms, dot products) runs in the same
//! order on every call, which keeps scores bit-identical across runs.

use crate::tokenizer::tokenize;
use std::collections::{BTreeMap, BTreeSet};

/// token -> share of the document's tokens equal to it
pub type TermFrequencyMap = BTreeMap<String, f64>;
/// token -> ln(N / df)
pub type IdfMap = BTreeMap<String, f64>;
/// token -> tf * idf, holding only tokens present in the document
pub type TfIdfVector = BTreeMap<String, f64>;

/// Term frequencies of `text`, normalized by its total token count.
///
/// A text without tokens yields an empty map.
pub fn compute_term_frequency(text: &str) -> TermFrequencyMap {
    term_frequency(&tokenize(text))
}

pub(crate) fn term_frequency(tokens: &[String]) -> TermFrequencyMap {
    let mut tf = TermFrequencyMap::new();
    if tokens.is_empty() {
        return tf;
    }
    for token in tokens {
        *tf.entry(token.clone()).or_insert(0.0) += 1.0;
    }
    let total = tokens.len() as f64;
    for count in tf.values_mut() {
        *count /= total;
    }
    tf
}

/// Inverse document frequency of every token seen in `documents`.
pub fn compute_inverse_document_frequency<S: AsRef<str>>(documents: &[S]) -> IdfMap {
    let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();
    inverse_document_frequency(&tokenized)
}

pub(crate) fn inverse_document_frequency(tokenized: &[Vec<String>]) -> IdfMap {
    let n = tokenized.len() as f64;
    let mut df: BTreeMap<&str, u32> = BTreeMap::new();
    for tokens in tokenized {
        let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
        for token in unique {
            *df.entry(token).or_insert(0) += 1;
        }
    }
    df.into_iter()
        .map(|(token, df_t)| {
            let idf = if df_t == 0 { 0.0 } else { (n / df_t as f64).ln() };
            (token.to_string(), idf)
        })
        .collect()
}

/// Scale each term frequency by its IDF. Tokens unknown to `idf` weigh 0.
pub fn weight(tf: &TermFrequencyMap, idf: &IdfMap) -> TfIdfVector {
    tf.iter()
        .map(|(token, f)| (token.clone(), f * idf.get(token).copied().unwrap_or(0.0)))
        .collect()
}

fn sum_of_squares(v: &TfIdfVector) -> f64 {
    v.values().map(|w| w * w).sum()
}

/// Cosine of the angle between two sparse vectors.
///
/// Returns 0 when either vector has zero norm (empty text, or only tokens
/// present in every document).
pub fn cosine_similarity(a: &TfIdfVector, b: &TfIdfVector) -> f64 {
    let (sa, sb) = (sum_of_squares(a), sum_of_squares(b));
    let denominator = (sa * sb).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    let dot: f64 = a
        .iter()
        .filter_map(|(token, wa)| b.get(token).map(|wb| wa * wb))
        .sum();
    // identical vectors give dot == sa == sb and sqrt(sa * sa) == sa, so exactly 1;
    // near-parallel ones can still round just past 1
    (dot / denominator).clamp(0.0, 1.0)
}

/// Similarity of `query` to each of `corpus`, in corpus order.
///
/// IDF is computed over the query together with the corpus.
pub fn score_corpus<S: AsRef<str>>(query: &str, corpus: &[S]) -> Vec<f64> {
    let mut tokenized = Vec::with_capacity(corpus.len() + 1);
    tokenized.push(tokenize(query));
    tokenized.extend(corpus.iter().map(|text| tokenize(text.as_ref())));

    let idf = inverse_document_frequency(&tokenized);
    let query_vec = weight(&term_frequency(&tokenized[0]), &idf);
    tracing::trace!(vocabulary = idf.len(), documents = corpus.len(), "scoring corpus");

    tokenized[1..]
        .iter()
        .map(|tokens| cosine_similarity(&query_vec, &weight(&term_frequency(tokens), &idf)))
        .collect()
}
