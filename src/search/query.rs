// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing and term resolution.
//!
//! A query goes through the same [`Tokenizer`] as the corpus, so `"Mesh-Cell"`
//! and a title containing `mesh_cell` meet on the same terms. Duplicates collapse
//! to their first occurrence.

use crate::scoring::{WeightedTerm, PREFIX_MATCH_WEIGHT};
use crate::types::InvertedIndex;
use crate::util::Tokenizer;
use std::collections::HashSet;

/// The ordered, de-duplicated terms of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTerms {
    terms: Vec<String>,
}

impl QueryTerms {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

/// Tokenize a raw query. Blank or punctuation-only input yields no terms.
pub fn parse_query(query: &str, tokenizer: &Tokenizer) -> QueryTerms {
    let mut seen = HashSet::new();
    let terms = tokenizer
        .terms(query)
        .into_iter()
        .filter(|term| seen.insert(term.clone()))
        .collect();
    QueryTerms { terms }
}

/// Map query terms onto index terms.
///
/// Exact matches carry full weight. With `prefix_last` set, the final query term
/// also reaches every vocabulary term it prefixes, at [`PREFIX_MATCH_WEIGHT`];
/// this is what makes search-as-you-type find `vtk_cell_type` from `vtk_ce`.
/// Terms absent from the index resolve to nothing.
pub fn resolve_terms(
    query: &QueryTerms,
    index: &InvertedIndex,
    prefix_last: bool,
) -> Vec<WeightedTerm> {
    let mut resolved = Vec::with_capacity(query.len());
    let last = query.len().saturating_sub(1);

    for (query_idx, term) in query.iter().enumerate() {
        if index.postings(term).is_some() {
            resolved.push(WeightedTerm::exact(query_idx, term));
        }
        if prefix_last && query_idx == last {
            resolved.extend(
                index
                    .terms_with_prefix(term)
                    .iter()
                    .filter(|candidate| candidate.as_str() != term)
                    .map(|candidate| WeightedTerm {
                        query_idx,
                        term: candidate.clone(),
                        weight: PREFIX_MATCH_WEIGHT,
                    }),
            );
        }
    }

    resolved
}
