// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! BM25 over two fields.
//!
//! Each `(term, field)` pair contributes
//!
//! ```text
//! idf(term) * tf * (k1 + 1) / (tf + k1 * (1 - b + b * len / avg_len))
//! ```
//!
//! and title contributions are multiplied by `title_boost`. A document's score is
//! the sum over every query term and both fields. Field length is normalized
//! against the average for *that* field.
//!
//! # Determinism
//!
//! Scores are summed in a fixed order (query term order, then posting order), so
//! two builds of the same corpus produce bit-identical scores and exact ties stay
//! exact.

use crate::config::SearchConfig;
use crate::types::{DocId, Field, InvertedIndex};
use std::collections::BTreeMap;

/// Weight applied to a vocabulary term reached by prefix expansion rather than
/// an exact match.
pub const PREFIX_MATCH_WEIGHT: f64 = 0.5;

/// The BM25 knobs, pulled out of [`SearchConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
    pub title_boost: f64,
}

impl Bm25Params {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            k1: config.k1,
            b: config.b,
            title_boost: config.title_boost,
        }
    }

    #[inline]
    fn field_boost(&self, field: Field) -> f64 {
        match field {
            Field::Title => self.title_boost,
            Field::Text => 1.0,
        }
    }
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

/// An index term the scorer should look up, tied back to the query term it
/// came from.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTerm {
    /// Index of the originating term in the parsed query.
    pub query_idx: usize,
    /// Term as stored in the index.
    pub term: String,
    /// 1.0 for exact matches, [`PREFIX_MATCH_WEIGHT`] for expansions.
    pub weight: f64,
}

impl WeightedTerm {
    pub fn exact(query_idx: usize, term: impl Into<String>) -> Self {
        Self {
            query_idx,
            term: term.into(),
            weight: 1.0,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.weight == 1.0
    }
}

/// A document that matched at least one query term.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub doc_id: DocId,
    pub score: f64,
    /// Query terms (by query index) that hit this document, ascending.
    pub matched_terms: Vec<usize>,
}

/// Inverse document frequency, `ln(1 + (N - df + 0.5) / (df + 0.5))`.
///
/// Always positive, so a matching term can only raise a score.
#[inline]
pub fn idf(total_docs: usize, doc_freq: usize) -> f64 {
    let n = total_docs as f64;
    let df = doc_freq as f64;
    (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
}

/// Saturated, length-normalized term frequency.
///
/// A zero `avg_len` only happens for a field that is empty corpus-wide, where no
/// term can match; the ratio falls back to 1 to keep the result finite.
#[inline]
pub fn tf_component(term_freq: u32, field_len: u32, avg_len: f64, k1: f64, b: f64) -> f64 {
    let tf = f64::from(term_freq);
    let ratio = if avg_len > 0.0 {
        f64::from(field_len) / avg_len
    } else {
        1.0
    };
    (tf * (k1 + 1.0)) / (tf + k1 * (1.0 - b + b * ratio))
}

/// Score every document reachable from `terms`.
///
/// Returns candidates in ascending id order. Documents no term reaches never
/// appear, and neither do documents scoring below `min_score`.
pub fn score_candidates(
    index: &InvertedIndex,
    terms: &[WeightedTerm],
    params: &Bm25Params,
    min_score: f64,
) -> Vec<Candidate> {
    let mut accumulated: BTreeMap<DocId, Candidate> = BTreeMap::new();

    for weighted in terms {
        let Some(list) = index.postings(&weighted.term) else {
            continue;
        };
        let term_idf = idf(index.total_docs, list.doc_freq);

        for posting in &list.postings {
            let tf = tf_component(
                posting.term_freq,
                index.field_length(posting.doc_id, posting.field),
                index.avg_field_length(posting.field),
                params.k1,
                params.b,
            );
            let contribution = weighted.weight * term_idf * tf * params.field_boost(posting.field);

            let candidate = accumulated
                .entry(posting.doc_id)
                .or_insert_with(|| Candidate {
                    doc_id: posting.doc_id,
                    score: 0.0,
                    matched_terms: Vec::new(),
                });
            candidate.score += contribution;
            if let Err(slot) = candidate.matched_terms.binary_search(&weighted.query_idx) {
                candidate.matched_terms.insert(slot, weighted.query_idx);
            }
        }
    }

    accumulated
        .into_values()
        .filter(|candidate| candidate.score >= min_score)
        .collect()
}
