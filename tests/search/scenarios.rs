//! End-to-end query scenarios.

use crate::common::{
    assert_ranked, fixture_corpus, fixture_searcher, hit_ids, locations, searcher_for,
};
use docseek::{SearchConfig, SearchOutcome, Searcher};

#[test]
fn test_title_match_beats_text_match_and_non_match_is_excluded() {
    let searcher = searcher_for(&[
        ("Alpha", "first document"),
        ("Beta", "second document"),
        ("Gamma", "third document mentions alpha once"),
    ]);
    assert_eq!(hit_ids(&searcher, "alpha", 10), vec![0, 2]);
}

#[test]
fn test_unknown_term_returns_empty_list() {
    let searcher = fixture_searcher(SearchConfig::default());
    let outcome = searcher.search("zyzzyva", 10);
    assert_eq!(outcome, SearchOutcome::Results(Vec::new()));
    assert!(outcome.is_no_matches());
    assert!(!outcome.is_empty_query());
}

#[test]
fn test_blank_query_is_distinct_from_no_matches() {
    let searcher = fixture_searcher(SearchConfig::default());
    for query in ["", " ", "\t\n", "...", "= ( )"] {
        let outcome = searcher.search(query, 10);
        assert!(outcome.is_empty_query(), "{:?} should be an empty query", query);
        assert!(outcome.hits().is_empty());
    }
}

#[test]
fn test_skipped_record_never_surfaces() {
    let searcher = fixture_searcher(SearchConfig::default());
    // The orphan record's own words.
    let outcome = searcher.search("orphan anchor skipped", 20);
    assert!(outcome.hits().is_empty());

    // Nor does the empty-location page record.
    let hits = searcher.search("CurrentModule", 20).into_hits();
    assert!(hits.is_empty());
    assert_eq!(searcher.warnings().len(), 2);
}

#[test]
fn test_fixture_vtk_query() {
    let searcher = fixture_searcher(SearchConfig::default());
    let hits = searcher.search("vtk", 10).into_hits();
    assert_ranked(&hits);

    let mut found = locations(&hits);
    found.sort_unstable();
    assert_eq!(
        found,
        vec!["#MeshKit.vtk_args-Tuple{Any, Any}", "#MeshKit.vtk_cell_type"]
    );
}

#[test]
fn test_fixture_multi_term_query_ranks_union() {
    let searcher = fixture_searcher(SearchConfig::default());
    let hits = searcher.search("mesh cells", 20).into_hits();
    assert_ranked(&hits);

    // Both lead entries have one term in the title and both terms twice in the
    // text; "cells" is the rarer term, so the num_cells title wins.
    assert_eq!(hits[0].location, "#MeshKit.num_cells");
    assert_eq!(hits[1].location, "#MeshKit.Mesh");
    // Union semantics: a document matching only one term still appears.
    assert!(locations(&hits).contains(&"#MeshKit.vtk_args-Tuple{Any, Any}"));
}

#[test]
fn test_hits_carry_document_fields() {
    let searcher = fixture_searcher(SearchConfig::default());
    let hits = searcher.search("num_cells", 5).into_hits();
    let top = &hits[0];
    assert_eq!(top.location, "#MeshKit.num_cells");
    assert_eq!(top.title, "MeshKit.num_cells");
    assert_eq!(top.page, "API");
    assert_eq!(top.category, docseek::Category::Function);
    assert!(top.score > 0.0);
}

#[test]
fn test_query_case_and_punctuation_are_normalized() {
    let searcher = fixture_searcher(SearchConfig::default());
    let a = searcher.search("VTK_CELL_TYPE", 10);
    let b = searcher.search("vtk cell type", 10);
    assert_eq!(a, b);
}

#[test]
fn test_independent_searchers_do_not_interfere() {
    let corpus = fixture_corpus();
    let first = Searcher::new(corpus.clone(), SearchConfig::default()).unwrap();
    let second = searcher_for(&[("vtk", "")]);

    assert_eq!(second.search("vtk", 10).hits().len(), 1);
    assert_eq!(first.search("vtk", 10).hits().len(), 2);
}
