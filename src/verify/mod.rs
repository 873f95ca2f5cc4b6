// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the inverted index.
//!
//! The builder upholds these by construction and debug builds assert them after
//! every build. Tests call [`validate_index`] directly; property tests run it over
//! arbitrary corpora.

use crate::types::{Field, InvertedIndex};

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    /// Posting list is empty (every term should have at least one posting).
    #[error("posting list for '{term}' is empty")]
    EmptyPostingList { term: String },

    /// Posting list is not sorted by (doc_id, field), or repeats a pair.
    #[error("posting list for '{term}' not sorted at position {position}")]
    UnsortedPostingList { term: String, position: usize },

    /// Document frequency doesn't match unique doc count.
    #[error("posting list for '{term}' has doc_freq {claimed} but {actual} unique docs")]
    IncorrectDocFreq {
        term: String,
        claimed: usize,
        actual: usize,
    },

    /// Posting refers to a document outside the corpus.
    #[error("posting for '{term}' has doc_id {doc_id} >= total_docs {total_docs}")]
    InvalidDocId {
        term: String,
        doc_id: u32,
        total_docs: usize,
    },

    /// term_freq disagrees with the positions list, or positions aren't increasing.
    #[error("posting for '{term}' in doc {doc_id} has malformed positions")]
    MalformedPositions { term: String, doc_id: u32 },

    /// A position lies beyond the field's token count.
    #[error("posting for '{term}' in doc {doc_id} {field} has position {position} >= length {length}")]
    PositionOutOfBounds {
        term: String,
        doc_id: u32,
        field: Field,
        position: u32,
        length: u32,
    },

    /// field_lengths doesn't have one entry per document.
    #[error("field_lengths.len() {lengths} != total_docs {total_docs}")]
    MismatchedFieldLengths { lengths: usize, total_docs: usize },

    /// Vocabulary is unsorted or disagrees with the term map.
    #[error("vocabulary is not the sorted key set of the term map")]
    VocabularyMismatch,
}

/// Check every index invariant. Returns the first violation found.
pub fn validate_index(index: &InvertedIndex) -> Result<(), InvariantError> {
    if index.field_lengths.len() != index.total_docs {
        return Err(InvariantError::MismatchedFieldLengths {
            lengths: index.field_lengths.len(),
            total_docs: index.total_docs,
        });
    }

    let vocabulary_ok = index.vocabulary.len() == index.terms.len()
        && index.vocabulary.windows(2).all(|w| w[0] < w[1])
        && index.vocabulary.iter().all(|t| index.terms.contains_key(t));
    if !vocabulary_ok {
        return Err(InvariantError::VocabularyMismatch);
    }

    for (term, list) in &index.terms {
        if list.postings.is_empty() {
            return Err(InvariantError::EmptyPostingList { term: term.clone() });
        }

        for (position, pair) in list.postings.windows(2).enumerate() {
            if (pair[0].doc_id, pair[0].field) >= (pair[1].doc_id, pair[1].field) {
                return Err(InvariantError::UnsortedPostingList {
                    term: term.clone(),
                    position: position + 1,
                });
            }
        }

        let mut unique_docs = 0;
        let mut last_doc = None;
        for posting in &list.postings {
            if last_doc != Some(posting.doc_id) {
                unique_docs += 1;
                last_doc = Some(posting.doc_id);
            }

            if posting.doc_id.as_usize() >= index.total_docs {
                return Err(InvariantError::InvalidDocId {
                    term: term.clone(),
                    doc_id: posting.doc_id.get(),
                    total_docs: index.total_docs,
                });
            }

            let increasing = posting.positions.windows(2).all(|w| w[0] < w[1]);
            if !increasing || posting.term_freq as usize != posting.positions.len() {
                return Err(InvariantError::MalformedPositions {
                    term: term.clone(),
                    doc_id: posting.doc_id.get(),
                });
            }

            let length = index.field_length(posting.doc_id, posting.field);
            if let Some(&position) = posting.positions.last() {
                if position >= length {
                    return Err(InvariantError::PositionOutOfBounds {
                        term: term.clone(),
                        doc_id: posting.doc_id.get(),
                        field: posting.field,
                        position,
                        length,
                    });
                }
            }
        }

        if unique_docs != list.doc_freq {
            return Err(InvariantError::IncorrectDocFreq {
                term: term.clone(),
                claimed: list.doc_freq,
                actual: unique_docs,
            });
        }
    }

    Ok(())
}
