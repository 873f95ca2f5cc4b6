//! Ranking and truncation tests.

use crate::common::{assert_ranked, make_doc, make_doc_with_category, searcher_for};
use docseek::{Category, DocId, QueryOptions, SearchConfig, Searcher};

fn ids(searcher: &Searcher, query: &str, options: &QueryOptions) -> Vec<u32> {
    searcher
        .search_with(query, options)
        .hits()
        .iter()
        .map(|h| h.doc_id.get())
        .collect()
}

#[test]
fn test_exact_ties_break_by_category_then_id() {
    let docs = vec![
        make_doc_with_category(0, "mesh", "", Category::Other),
        make_doc_with_category(1, "mesh", "", Category::Function),
        make_doc_with_category(2, "mesh", "", Category::Method),
        make_doc_with_category(3, "mesh", "", Category::Section),
        make_doc_with_category(4, "mesh", "", Category::Page),
        make_doc_with_category(5, "mesh", "", Category::Type),
    ];
    let searcher = Searcher::from_documents(docs, SearchConfig::default()).unwrap();
    let hits = searcher.search("mesh", 10).into_hits();

    let scores: Vec<f64> = hits.iter().map(|h| h.score).collect();
    assert!(scores.windows(2).all(|w| w[0] == w[1]), "Scores should tie: {:?}", scores);

    let order: Vec<u32> = hits.iter().map(|h| h.doc_id.get()).collect();
    assert_eq!(order, vec![4, 3, 1, 2, 5, 0]);
}

#[test]
fn test_title_boost_is_tunable() {
    // doc 0: term once in title. doc 1: term three times in text.
    let pairs = [("mesh", "x y z"), ("other", "mesh mesh mesh")];

    let boosted = searcher_for(&pairs);
    assert_eq!(ids(&boosted, "mesh", &QueryOptions::default()), vec![0, 1]);

    let config = SearchConfig {
        title_boost: 1.0,
        ..SearchConfig::default()
    };
    let flat = Searcher::from_documents(
        vec![make_doc(0, "mesh", "x y z"), make_doc(1, "other", "mesh mesh mesh")],
        config,
    )
    .unwrap();
    assert_eq!(ids(&flat, "mesh", &QueryOptions::default()), vec![1, 0]);
}

#[test]
fn test_shorter_field_scores_higher() {
    let searcher = searcher_for(&[
        ("a", "mesh with a lot of other words around it here"),
        ("b", "mesh only"),
    ]);
    assert_eq!(ids(&searcher, "mesh", &QueryOptions::default()), vec![1, 0]);
}

#[test]
fn test_rarer_term_weighs_more() {
    let searcher = searcher_for(&[
        ("x", "common rare"),
        ("y", "common common"),
        ("z", "common"),
    ]);
    let hits = searcher.search("common rare", 10).into_hits();
    assert_eq!(hits[0].doc_id, DocId(0));
    assert_ranked(&hits);
}

#[test]
fn test_truncation_respects_limit_and_max_results() {
    let docs: Vec<_> = (0..30)
        .map(|i| make_doc(i, &format!("mesh {}", i), "mesh"))
        .collect();
    let searcher = Searcher::from_documents(docs, SearchConfig::default()).unwrap();

    assert_eq!(searcher.search("mesh", 5).hits().len(), 5);
    assert_eq!(searcher.search("mesh", 1000).hits().len(), 20);
    assert_eq!(
        searcher.search_with("mesh", &QueryOptions::default()).hits().len(),
        20
    );
}

#[test]
fn test_truncated_prefix_matches_full_ranking() {
    let searcher = searcher_for(&[
        ("mesh", "cells"),
        ("cells", "mesh"),
        ("mesh cells", ""),
        ("other", "mesh mesh cells"),
    ]);
    let full = ids(&searcher, "mesh cells", &QueryOptions::with_limit(10));
    let top2 = ids(&searcher, "mesh cells", &QueryOptions::with_limit(2));
    assert_eq!(&full[..2], &top2[..]);
}

#[test]
fn test_min_score_excludes_weak_hits() {
    let pairs = [("mesh", ""), ("other", "a long body that mentions mesh once")];
    let all = searcher_for(&pairs).search("mesh", 10).into_hits();
    assert_eq!(all.len(), 2);

    let config = SearchConfig {
        min_score: (all[0].score + all[1].score) / 2.0,
        ..SearchConfig::default()
    };
    let strict = Searcher::from_documents(
        vec![make_doc(0, pairs[0].0, pairs[0].1), make_doc(1, pairs[1].0, pairs[1].1)],
        config,
    )
    .unwrap();
    let hits = strict.search("mesh", 10).into_hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].doc_id, DocId(0));
}

#[test]
fn test_category_filter_applies_before_truncation() {
    let docs = vec![
        make_doc_with_category(0, "mesh", "", Category::Page),
        make_doc_with_category(1, "mesh", "", Category::Page),
        make_doc_with_category(2, "mesh", "", Category::Function),
    ];
    let searcher = Searcher::from_documents(docs, SearchConfig::default()).unwrap();
    let options = QueryOptions::with_limit(1).categories([Category::Function]);
    assert_eq!(ids(&searcher, "mesh", &options), vec![2]);
}

#[test]
fn test_dedupe_keeps_best_copy_and_refills() {
    let mut docs = vec![
        make_doc(0, "mesh", ""),
        make_doc(1, "mesh", "padding words"),
        make_doc(2, "mesh", "more padding words here"),
    ];
    docs[1].location = docs[0].location.clone();

    let config = SearchConfig {
        dedupe_locations: true,
        ..SearchConfig::default()
    };
    let searcher = Searcher::from_documents(docs, config).unwrap();
    assert_eq!(ids(&searcher, "mesh", &QueryOptions::with_limit(2)), vec![0, 2]);
}
