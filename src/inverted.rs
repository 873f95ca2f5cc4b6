// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction and lookup.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTING_LIST_SORTED**: Each posting list is sorted by (doc_id, field)
//! 2. **DOC_FREQ_CORRECT**: doc_freq equals count of unique doc_ids
//! 3. **NON_EMPTY**: Every term has at least one posting
//! 4. **TF_MATCHES_POSITIONS**: term_freq == positions.len(), positions increasing
//! 5. **LENGTHS_ALIGNED**: field_lengths[doc_id] describes document doc_id
//!
//! All five fall out of processing documents in id order and, within a document,
//! the title before the text. The parallel build keeps that order in its reduce
//! phase, so both builds produce equal indexes.

use crate::types::{Document, DocId, Field, FieldLengths, InvertedIndex, Posting, PostingList};
use crate::util::Tokenizer;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::HashMap;

/// Corpora at least this large are tokenized in parallel.
pub const PARALLEL_THRESHOLD: usize = 512;

/// Postings contributed by a single document, title field first.
type DocContribution = (FieldLengths, Vec<(String, Posting)>);

impl InvertedIndex {
    /// Build the index for a fully loaded corpus.
    ///
    /// `documents[i].id` must equal `i`; the corpus loader guarantees this.
    #[tracing::instrument(skip_all, fields(documents = documents.len()))]
    pub fn build(documents: &[Document], tokenizer: &Tokenizer) -> InvertedIndex {
        #[cfg(feature = "parallel")]
        if documents.len() >= PARALLEL_THRESHOLD {
            return Self::build_parallel(documents, tokenizer);
        }
        Self::build_sequential(documents, tokenizer)
    }

    /// Single-threaded build.
    pub fn build_sequential(documents: &[Document], tokenizer: &Tokenizer) -> InvertedIndex {
        let contributions = documents.iter().map(|doc| index_document(doc, tokenizer));
        assemble(contributions, documents.len())
    }

    /// Map-reduce build: documents are tokenized in parallel (map), then merged in
    /// document order (reduce).
    #[cfg(feature = "parallel")]
    pub fn build_parallel(documents: &[Document], tokenizer: &Tokenizer) -> InvertedIndex {
        // MAP PHASE: one task per document; collect keeps input order
        let contributions: Vec<DocContribution> = documents
            .par_iter()
            .map(|doc| index_document(doc, tokenizer))
            .collect();

        // REDUCE PHASE
        assemble(contributions, documents.len())
    }

    /// Posting list for an exact term.
    #[inline]
    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    /// Number of documents containing `term`.
    #[inline]
    pub fn doc_freq(&self, term: &str) -> usize {
        self.terms.get(term).map_or(0, |list| list.doc_freq)
    }

    /// The posting for one `(term, document, field)`, if the term occurs there.
    pub fn posting(&self, term: &str, doc_id: DocId, field: Field) -> Option<&Posting> {
        let list = self.terms.get(term)?;
        list.postings
            .binary_search_by(|p| (p.doc_id, p.field).cmp(&(doc_id, field)))
            .ok()
            .map(|i| &list.postings[i])
    }

    /// Indexed terms starting with `prefix`, in sorted order.
    ///
    /// Two binary searches over the sorted vocabulary: everything with the prefix
    /// sits in one contiguous run.
    pub fn terms_with_prefix(&self, prefix: &str) -> &[String] {
        let start = self.vocabulary.partition_point(|t| t.as_str() < prefix);
        let len = self.vocabulary[start..].partition_point(|t| t.starts_with(prefix));
        &self.vocabulary[start..start + len]
    }

    /// Token count of one field of one document. Zero for unknown documents.
    #[inline]
    pub fn field_length(&self, doc_id: DocId, field: Field) -> u32 {
        self.field_lengths
            .get(doc_id.as_usize())
            .map_or(0, |lengths| lengths.get(field))
    }

    #[inline]
    pub fn avg_field_length(&self, field: Field) -> f64 {
        match field {
            Field::Title => self.avg_title_len,
            Field::Text => self.avg_text_len,
        }
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

/// Tokenize both fields of one document and group positions by term.
fn index_document(doc: &Document, tokenizer: &Tokenizer) -> DocContribution {
    let mut lengths = FieldLengths::default();
    let mut postings = Vec::new();

    for field in Field::ALL {
        let tokens = tokenizer.tokenize(doc.field(field));
        let len = tokens.len() as u32;
        match field {
            Field::Title => lengths.title = len,
            Field::Text => lengths.text = len,
        }

        // Group by term in first-occurrence order so the output never depends on
        // HashMap iteration order.
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut grouped: Vec<(String, Vec<u32>)> = Vec::new();
        for token in tokens {
            match slots.get(&token.term) {
                Some(&slot) => grouped[slot].1.push(token.position),
                None => {
                    slots.insert(token.term.clone(), grouped.len());
                    grouped.push((token.term, vec![token.position]));
                }
            }
        }

        postings.extend(grouped.into_iter().map(|(term, positions)| {
            let posting = Posting {
                doc_id: doc.id,
                field,
                term_freq: positions.len() as u32,
                positions,
            };
            (term, posting)
        }));
    }

    (lengths, postings)
}

/// Merge per-document contributions (already in document order) into an index.
fn assemble<I>(contributions: I, total_docs: usize) -> InvertedIndex
where
    I: IntoIterator<Item = DocContribution>,
{
    let mut terms: HashMap<String, PostingList> = HashMap::new();
    let mut field_lengths = Vec::with_capacity(total_docs);
    let mut total_tokens: (u64, u64) = (0, 0);

    for (lengths, postings) in contributions {
        total_tokens.0 += u64::from(lengths.title);
        total_tokens.1 += u64::from(lengths.text);
        field_lengths.push(lengths);

        for (term, posting) in postings {
            let list = terms.entry(term).or_default();
            // INVARIANT: DOC_FREQ_CORRECT
            // Postings of one document are contiguous, so a doc_id change is a new doc.
            if list.postings.last().map_or(true, |p| p.doc_id != posting.doc_id) {
                list.doc_freq += 1;
            }
            list.postings.push(posting);
        }
    }

    let mut vocabulary: Vec<String> = terms.keys().cloned().collect();
    vocabulary.sort_unstable();

    let (avg_title_len, avg_text_len) = if total_docs > 0 {
        (
            total_tokens.0 as f64 / total_docs as f64,
            total_tokens.1 as f64 / total_docs as f64,
        )
    } else {
        (0.0, 0.0)
    };

    let index = InvertedIndex {
        terms,
        vocabulary,
        field_lengths,
        total_docs,
        avg_title_len,
        avg_text_len,
    };

    tracing::debug!(
        documents = index.total_docs,
        terms = index.terms.len(),
        tokens = total_tokens.0 + total_tokens.1,
        "inverted index built"
    );
    debug_assert!(crate::verify::validate_index(&index).is_ok());
    index
}
