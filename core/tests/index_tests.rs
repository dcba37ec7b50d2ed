use rankcore::index::{PREVIEW_CHARS, PREVIEW_MARKER};
use rankcore::tfidf::{compute_inverse_document_frequency, compute_term_frequency, score_corpus};
use rankcore::{Document, RankError, TfIdfIndex};
use std::sync::Arc;
use std::thread;

fn index_of(docs: &[(&str, &str)]) -> TfIdfIndex {
    let index = TfIdfIndex::new();
    index
        .build_index(docs.iter().map(|(id, text)| Document::new(*id, *text)).collect())
        .unwrap();
    index
}

fn ids(results: &[rankcore::RankedResult]) -> Vec<&str> {
    results.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn ranks_resume_with_more_distinctive_overlap_first() {
    let index = index_of(&[
        ("r1", "python developer with machine learning experience"),
        ("r2", "java backend engineer with database skills"),
    ]);
    let results = index.search("python machine learning engineer", 10).unwrap();
    assert_eq!(ids(&results), vec!["r1", "r2"]);
    assert!(results[0].score > results[1].score);
    for r in &results {
        assert!((0.0..=1.0).contains(&r.score));
    }
    assert_eq!(results[0].rank, 1);
    assert_eq!(results[1].rank, 2);
}

#[test]
fn exact_match_ranks_first_with_full_score() {
    let index = index_of(&[
        ("java", "java developer"),
        ("exact", "python engineer"),
        ("rust", "rust engineer"),
    ]);
    let results = index.search("python engineer", 3).unwrap();
    assert_eq!(results[0].id, "exact");
    assert_eq!(results[0].score, 1.0);

    let index = index_of(&[("a", "go ml java"), ("b", "sql"), ("c", "ml")]);
    let results = index.search("go ml java", 3).unwrap();
    assert_eq!(results[0].id, "a");
    assert_eq!(results[0].score, 1.0);
}

#[test]
fn top_k_is_clamped_to_corpus_size() {
    let index = index_of(&[("a", "rust"), ("b", "go"), ("c", "java")]);
    let results = index.search("rust go", 1000).unwrap();
    assert_eq!(results.len(), 3);
    let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);

    assert!(index.search("rust go", 0).unwrap().is_empty());
}

#[test]
fn truncation_keeps_best_results() {
    let index = index_of(&[("a", "java spring"), ("b", "rust tokio"), ("c", "rust axum tokio")]);
    let results = index.search("rust tokio", 2).unwrap();
    assert_eq!(ids(&results), vec!["b", "c"]);
}

#[test]
fn ties_keep_insertion_order() {
    let index = index_of(&[("first", "cat dog"), ("second", "dog cat")]);
    let results = index.search("cat dog", 10).unwrap();
    assert_eq!(results[0].score, results[1].score);
    assert_eq!(ids(&results), vec!["first", "second"]);

    let index = index_of(&[("second", "dog cat"), ("first", "cat dog"), ("other", "bird")]);
    let results = index.search("cat dog", 10).unwrap();
    assert_eq!(ids(&results), vec!["second", "first", "other"]);
}

#[test]
fn duplicate_ids_are_scored_independently() {
    let index = index_of(&[("dup", "rust tokio"), ("dup", "java spring"), ("x", "go")]);
    let results = index.search("rust", 10).unwrap();
    assert_eq!(ids(&results), vec!["dup", "dup", "x"]);
    assert!(results[0].score > 0.0);
    assert_eq!(results[1].score, 0.0);
}

#[test]
fn rebuild_replaces_previous_corpus() {
    let index = index_of(&[("old1", "rust engineer"), ("old2", "go engineer")]);
    index
        .build_index(vec![
            Document::new("new1", "python analyst"),
            Document::new("new2", "sql analyst"),
        ])
        .unwrap();
    assert_eq!(index.len(), 2);
    let results = index.search("rust engineer", 10).unwrap();
    assert_eq!(ids(&results), vec!["new1", "new2"]);
    assert!(results.iter().all(|r| r.score == 0.0));
}

#[test]
fn search_is_deterministic() {
    let corpus = [
        ("a", "senior rust engineer tokio axum postgres"),
        ("b", "python data scientist pandas spark"),
        ("c", "rust embedded firmware engineer c"),
        ("d", "frontend react typescript engineer"),
    ];
    let first = index_of(&corpus).search("rust engineer with postgres", 4).unwrap();
    for _ in 0..5 {
        let again = index_of(&corpus).search("rust engineer with postgres", 4).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn whitespace_only_document_is_indexed_and_scores_zero() {
    assert!(compute_term_frequency("   \t\n").is_empty());
    let index = index_of(&[("blank", "   \t\n"), ("rust", "rust engineer")]);
    let results = index.search("rust", 10).unwrap();
    assert_eq!(ids(&results), vec!["rust", "blank"]);
    assert_eq!(results[1].score, 0.0);
}

#[test]
fn zero_overlap_scores_exactly_zero() {
    let scores = score_corpus("haskell compiler", &["java spring", "python django"]);
    assert_eq!(scores, vec![0.0, 0.0]);
}

#[test]
fn term_frequencies_sum_to_one() {
    for text in ["rust", "a b c a", "one two two three three three"] {
        let total: f64 = compute_term_frequency(text).values().sum();
        assert!((total - 1.0).abs() < 1e-12, "{text}");
    }
}

#[test]
fn idf_uses_query_and_corpus() {
    let idf = compute_inverse_document_frequency(&["rust engineer", "rust", "go engineer"]);
    assert_eq!(idf["rust"], (3.0f64 / 2.0).ln());
    assert_eq!(idf["go"], 3.0f64.ln());
    assert!(idf.values().all(|w| *w >= 0.0));
}

#[test]
fn invalid_input_is_rejected() {
    let index = TfIdfIndex::new();
    assert!(matches!(index.build_index(vec![]), Err(RankError::InvalidInput(_))));
    assert!(matches!(
        index.build_index_from_parallel(vec!["a".into()], vec![]),
        Err(RankError::InvalidInput(_))
    ));
    assert!(matches!(
        index.build_index_from_parallel(vec!["a".into(), "b".into()], vec!["1".into()]),
        Err(RankError::InvalidInput(_))
    ));
    assert!(matches!(index.search("rust", 5), Err(RankError::IndexNotBuilt)));

    let index = index_of(&[("a", "rust")]);
    assert!(matches!(index.search("", 5), Err(RankError::InvalidInput(_))));
}

#[test]
fn failed_rebuild_keeps_previous_corpus() {
    let index = index_of(&[("a", "rust")]);
    assert!(index.build_index(vec![]).is_err());
    assert_eq!(index.len(), 1);
}

#[test]
fn long_text_preview_is_truncated() {
    let long = format!("rust {}", "x".repeat(PREVIEW_CHARS));
    let index = index_of(&[("long", long.as_str()), ("short", "go developer")]);
    let results = index.search("rust", 10).unwrap();
    let long_hit = results.iter().find(|r| r.id == "long").unwrap();
    assert_eq!(long_hit.preview.len(), PREVIEW_CHARS + PREVIEW_MARKER.len());
    assert!(long_hit.preview.ends_with(PREVIEW_MARKER));
    let short_hit = results.iter().find(|r| r.id == "short").unwrap();
    assert_eq!(short_hit.preview, "go developer");
}

#[test]
fn concurrent_searches_see_a_whole_snapshot() {
    let index = Arc::new(index_of(&[("a", "rust engineer"), ("b", "go engineer")]));
    let writer = {
        let index = Arc::clone(&index);
        thread::spawn(move || {
            for i in 0..50 {
                let docs = (0..3)
                    .map(|j| Document::new(format!("gen{i}-{j}"), "rust engineer"))
                    .collect();
                index.build_index(docs).unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            thread::spawn(move || {
                for _ in 0..50 {
                    let results = index.search("rust", 10).unwrap();
                    let generation = results[0].id.split('-').next().unwrap().to_string();
                    assert!(results.len() == 2 || results.len() == 3);
                    if results.len() == 3 {
                        assert!(results.iter().all(|r| r.id.starts_with(&generation)));
                    }
                }
            })
        })
        .collect();
    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
}
