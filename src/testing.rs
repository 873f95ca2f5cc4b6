//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::build::{load_records, LoadedCorpus};
use crate::config::SearchConfig;
use crate::search::Searcher;
use crate::types::{Category, DocId, Document};
use serde_json::{json, Value};

/// Create a test document in the `section` category.
///
/// Locations are unique per id: `#doc-{id}`.
pub fn make_doc(id: u32, title: &str, text: &str) -> Document {
    make_doc_with_category(id, title, text, Category::Section)
}

/// Create a test document with an explicit category.
pub fn make_doc_with_category(id: u32, title: &str, text: &str, category: Category) -> Document {
    Document {
        id: DocId(id),
        location: format!("#doc-{}", id),
        page: format!("Page {}", id),
        title: title.to_string(),
        text: text.to_string(),
        category,
    }
}

/// Documents from `(title, text)` pairs, ids in order.
pub fn make_docs(pairs: &[(&str, &str)]) -> Vec<Document> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, (title, text))| make_doc(i as u32, title, text))
        .collect()
}

/// One raw corpus record as JSON.
pub fn raw_record(location: &str, page: &str, title: &str, text: &str, category: &str) -> Value {
    json!({
        "location": location,
        "page": page,
        "title": title,
        "text": text,
        "category": category,
    })
}

/// Load raw records the way a corpus file would be loaded.
pub fn load(records: Vec<Value>) -> LoadedCorpus {
    load_records(records)
}

/// A searcher over `(title, text)` pairs with the default configuration.
pub fn searcher_for(pairs: &[(&str, &str)]) -> Searcher {
    searcher_with(pairs, SearchConfig::default())
}

/// A searcher over `(title, text)` pairs with a custom configuration.
///
/// Panics on an invalid configuration; tests pass known-good ones.
pub fn searcher_with(pairs: &[(&str, &str)], config: SearchConfig) -> Searcher {
    match Searcher::from_documents(make_docs(pairs), config) {
        Ok(searcher) => searcher,
        Err(e) => panic!("test configuration rejected: {}", e),
    }
}

/// Ids of the hits a searcher returns, in rank order.
pub fn hit_ids(searcher: &Searcher, query: &str, limit: usize) -> Vec<u32> {
    searcher
        .search(query, limit)
        .hits()
        .iter()
        .map(|hit| hit.doc_id.get())
        .collect()
}
