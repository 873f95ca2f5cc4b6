// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a documentation search index.
//!
//! These types define how documents, fields, postings and results fit together.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Document**: `location` is never empty, `id` equals its position in the loaded
//!   corpus. Both are enforced at the load boundary, not re-checked at use sites.
//!
//! - **Posting**: `term_freq == positions.len()` and positions are strictly increasing.
//!   Snippet windows are computed from these positions, so a duplicate or out-of-order
//!   position silently shifts highlights.
//!
//! - **PostingList**: postings sorted by `(doc_id, field)` with Title before Text, and
//!   `doc_freq` equal to the number of distinct documents.
//!
//! - **InvertedIndex**: `field_lengths.len() == total_docs`, vocabulary sorted and equal
//!   to the key set of `terms`.
//!
//! `verify::validate_index` checks all of the index-side invariants in one pass.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Type-safe document identifier, assigned in load order.
///
/// Prevents accidentally passing a token position where a document ID is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// What kind of documentable entry this is.
///
/// The vocabulary is closed. Anything the generator emits that isn't listed here
/// (`module`, `macro`, `constant`, ...) becomes `Other` at load time rather than
/// being rejected.
///
/// **Gotcha**: The derived `Ord` follows declaration order and is only used for
/// deterministic serialization. Ranking uses `priority()`, where `Method`,
/// `Function` and `Type` share a tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Page,
    Section,
    Method,
    Function,
    Type,
    Other,
}

impl Category {
    /// Parse a raw category tag, coercing anything unrecognized to `Other`.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "page" => Category::Page,
            "section" => Category::Section,
            "method" => Category::Method,
            "function" => Category::Function,
            "type" => Category::Type,
            _ => Category::Other,
        }
    }

    /// Tie-break priority: lower is better.
    ///
    /// page (0) > section (1) > method/function/type (2) > other (3)
    #[inline]
    pub fn priority(self) -> u8 {
        match self {
            Category::Page => 0,
            Category::Section => 1,
            Category::Method | Category::Function | Category::Type => 2,
            Category::Other => 3,
        }
    }

    /// Convert to lowercase string representation.
    ///
    /// Matches the serde `rename_all = "lowercase"` convention.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Page => "page",
            Category::Section => "section",
            Category::Method => "method",
            Category::Function => "function",
            Category::Type => "type",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated corpus entry.
///
/// Created once at load time and never mutated. `id` indexes into the searcher's
/// document table and the index's `field_lengths`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    /// Opaque anchor or URL fragment. Never empty.
    pub location: String,
    /// Title of the containing page
    pub page: String,
    /// Entry title (equals `page` for page-level entries)
    pub title: String,
    /// Body content, possibly empty
    pub text: String,
    pub category: Category,
}

impl Document {
    /// Borrow the contents of an indexed field.
    #[inline]
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Text => &self.text,
        }
    }
}

/// Which indexed field a token came from.
///
/// The derived `Ord` puts Title before Text, which is also the order postings for
/// the same document appear in a posting list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Text,
}

impl Field {
    /// Both indexed fields, in posting order.
    pub const ALL: [Field; 2] = [Field::Title, Field::Text];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Text => "text",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// INDEX TYPES
// =============================================================================

/// Every occurrence of one term in one field of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub doc_id: DocId,
    pub field: Field,
    /// Number of occurrences; always `positions.len()`
    pub term_freq: u32,
    /// Ordinal token positions within the field, strictly increasing
    pub positions: Vec<u32>,
}

/// All occurrences of a single term across the corpus.
///
/// Sorted by `(doc_id, field)`. A document can contribute up to two postings
/// (one per field), so `doc_freq` is cached rather than being `postings.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostingList {
    pub postings: Vec<Posting>,
    /// Number of unique documents containing this term
    pub doc_freq: usize,
}

/// Token counts of one document's indexed fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FieldLengths {
    pub title: u32,
    pub text: u32,
}

impl FieldLengths {
    #[inline]
    pub fn get(&self, field: Field) -> u32 {
        match field {
            Field::Title => self.title,
            Field::Text => self.text,
        }
    }
}

/// The inverted index: term → posting list, plus the length statistics BM25 needs.
///
/// Built once from a fully loaded corpus by [`InvertedIndex::build`] and immutable
/// afterwards. Two builds over the same documents compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InvertedIndex {
    /// Map from normalized term to posting list
    pub terms: HashMap<String, PostingList>,
    /// Sorted copy of the term keys, for prefix expansion
    pub vocabulary: Vec<String>,
    /// Per-document token counts, indexed by `DocId`
    pub field_lengths: Vec<FieldLengths>,
    /// Total number of documents indexed
    pub total_docs: usize,
    pub avg_title_len: f64,
    pub avg_text_len: f64,
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// A byte range inside [`Snippet::text`] that should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
}

/// An excerpt of a document with matched terms marked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Snippet {
    pub text: String,
    /// Non-overlapping, ascending byte ranges into `text`
    pub highlights: Vec<Highlight>,
}

impl Snippet {
    /// Snippet with no highlighting.
    pub fn plain(text: impl Into<String>) -> Self {
        Snippet {
            text: text.into(),
            highlights: Vec::new(),
        }
    }

    /// Wrap every highlighted range in `open`/`close` markers.
    ///
    /// ```
    /// use docseek::{Highlight, Snippet};
    ///
    /// let snippet = Snippet {
    ///     text: "the alpha build".to_string(),
    ///     highlights: vec![Highlight { start: 4, end: 9 }],
    /// };
    /// assert_eq!(snippet.render("<mark>", "</mark>"), "the <mark>alpha</mark> build");
    /// ```
    pub fn render(&self, open: &str, close: &str) -> String {
        let extra = self.highlights.len() * (open.len() + close.len());
        let mut out = String::with_capacity(self.text.len() + extra);
        let mut cursor = 0;
        for h in &self.highlights {
            // Ranges come from the extractor and always sit on char boundaries,
            // but a hand-built snippet might not.
            let (Some(before), Some(marked)) =
                (self.text.get(cursor..h.start), self.text.get(h.start..h.end))
            else {
                continue;
            };
            out.push_str(before);
            out.push_str(open);
            out.push_str(marked);
            out.push_str(close);
            cursor = h.end;
        }
        out.push_str(self.text.get(cursor..).unwrap_or(""));
        out
    }
}

/// One ranked result, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub doc_id: DocId,
    pub location: String,
    pub title: String,
    pub page: String,
    pub category: Category,
    pub snippet: Snippet,
    pub score: f64,
}

/// What a query produced.
///
/// An empty query is not the same thing as a query that matched nothing: the
/// first is `EmptyQuery`, the second is `Results` with an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "hits")]
pub enum SearchOutcome {
    EmptyQuery,
    Results(Vec<SearchHit>),
}

impl SearchOutcome {
    /// Ranked hits; empty for both `EmptyQuery` and no matches.
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            SearchOutcome::EmptyQuery => &[],
            SearchOutcome::Results(hits) => hits,
        }
    }

    pub fn into_hits(self) -> Vec<SearchHit> {
        match self {
            SearchOutcome::EmptyQuery => Vec::new(),
            SearchOutcome::Results(hits) => hits,
        }
    }

    pub fn is_empty_query(&self) -> bool {
        matches!(self, SearchOutcome::EmptyQuery)
    }

    /// A real query that matched nothing.
    pub fn is_no_matches(&self) -> bool {
        matches!(self, SearchOutcome::Results(hits) if hits.is_empty())
    }
}
