// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snippet extraction: which part of the body to show, and what to highlight.
//!
//! The window is `snippet_window` tokens long and may start anywhere in the
//! body. The window covering the most *distinct* query terms wins; ties go to
//! the earliest start, so a body shorter than the window is shown whole. Match
//! positions come from the index postings, byte spans from re-tokenizing the
//! text with the same tokenizer.
//!
//! The excerpt is cut from the source text, so it keeps the original casing and
//! punctuation between words. Whitespace runs collapse to one space, and `…` marks
//! text elided before or after the window. A window touching either end of the
//! body keeps the punctuation there (`num_cells(mesh)` stays intact).
//!
//! A document whose body has no match (title-only hit, empty text) gets its title
//! instead, or its page when the title is blank, with no highlights.

use crate::scoring::WeightedTerm;
use crate::types::{Document, Field, Highlight, InvertedIndex, Snippet};
use crate::util::{Token, Tokenizer};

/// Fallback snippets are cut to this many characters.
pub const FALLBACK_SNIPPET_CHARS: usize = 120;

/// Marks elided text.
pub const ELLIPSIS: &str = "…";

/// Builds snippets for the documents of one index.
#[derive(Debug, Clone, Copy)]
pub struct SnippetExtractor<'a> {
    index: &'a InvertedIndex,
    tokenizer: &'a Tokenizer,
    window: usize,
}

impl<'a> SnippetExtractor<'a> {
    pub fn new(index: &'a InvertedIndex, tokenizer: &'a Tokenizer, window: usize) -> Self {
        Self {
            index,
            tokenizer,
            window: window.max(1),
        }
    }

    /// Snippet for `doc` given the resolved query terms.
    pub fn extract(&self, doc: &Document, terms: &[WeightedTerm]) -> Snippet {
        let matches = self.text_matches(doc, terms);
        let Some(start) = best_window_start(&matches, self.window) else {
            return fallback_snippet(doc);
        };

        let tokens = self.tokenizer.tokenize(&doc.text);
        let start = (start as usize).min(tokens.len().saturating_sub(self.window));
        let end = start.saturating_add(self.window).min(tokens.len());
        if start >= end {
            // Postings and text disagree; only possible with a foreign index.
            return fallback_snippet(doc);
        }

        let mut matched: Vec<u32> = matches.iter().map(|&(position, _)| position).collect();
        matched.dedup();

        excerpt(
            &doc.text,
            &tokens[start..end],
            &matched,
            start > 0,
            end < tokens.len(),
        )
    }

    /// `(position, query_idx)` for every body occurrence of every resolved term,
    /// sorted by position.
    fn text_matches(&self, doc: &Document, terms: &[WeightedTerm]) -> Vec<(u32, usize)> {
        let mut matches = Vec::new();
        for weighted in terms {
            if let Some(posting) = self.index.posting(&weighted.term, doc.id, Field::Text) {
                matches.extend(posting.positions.iter().map(|&p| (p, weighted.query_idx)));
            }
        }
        matches.sort_unstable();
        matches
    }
}

/// Start position of the best window over `matches`, which must be sorted by
/// position. `None` when there are no matches.
///
/// Coverage only grows when a match enters at the right edge, so the earliest
/// start of a best window is either 0 or `position + 1 - window` for some match.
/// Those candidates are swept in order with two pointers: `hi` admits matches
/// below `start + window`, `lo` retires matches below `start`.
pub fn best_window_start(matches: &[(u32, usize)], window: usize) -> Option<u32> {
    let num_terms = matches.iter().map(|&(_, q)| q).max()? + 1;
    let window = u32::try_from(window.max(1)).unwrap_or(u32::MAX);

    let mut starts: Vec<u32> = std::iter::once(0)
        .chain(
            matches
                .iter()
                .map(|&(position, _)| position.saturating_add(1).saturating_sub(window)),
        )
        .collect();
    starts.sort_unstable();
    starts.dedup();

    let mut counts = vec![0usize; num_terms];
    let mut distinct = 0usize;
    let mut best: Option<(usize, u32)> = None;
    let (mut lo, mut hi) = (0, 0);

    for start in starts {
        let limit = u64::from(start) + u64::from(window);

        while hi < matches.len() && u64::from(matches[hi].0) < limit {
            let q = matches[hi].1;
            if counts[q] == 0 {
                distinct += 1;
            }
            counts[q] += 1;
            hi += 1;
        }
        while lo < hi && matches[lo].0 < start {
            let q = matches[lo].1;
            counts[q] -= 1;
            if counts[q] == 0 {
                distinct -= 1;
            }
            lo += 1;
        }

        // Strictly greater: an equal count never displaces an earlier start.
        if best.map_or(true, |(count, _)| distinct > count) {
            best = Some((distinct, start));
        }
    }

    best.map(|(_, start)| start)
}

/// Rebuild the window's text and mark the matched tokens.
fn excerpt(
    text: &str,
    window: &[Token],
    matched: &[u32],
    leading: bool,
    trailing: bool,
) -> Snippet {
    let mut out = String::new();
    let mut highlights = Vec::new();

    if leading {
        out.push_str(ELLIPSIS);
        out.push(' ');
    } else if let Some(first) = window.first() {
        push_collapsed(&mut out, text[..first.span.start].trim_start());
    }

    let mut previous_end = None;
    for token in window {
        if let Some(gap_start) = previous_end {
            push_collapsed(&mut out, &text[gap_start..token.span.start]);
        }
        let start = out.len();
        out.push_str(&text[token.span.clone()]);
        if matched.binary_search(&token.position).is_ok() {
            highlights.push(Highlight {
                start,
                end: out.len(),
            });
        }
        previous_end = Some(token.span.end);
    }

    if trailing {
        out.push(' ');
        out.push_str(ELLIPSIS);
    } else if let Some(last) = window.last() {
        push_collapsed(&mut out, text[last.span.end..].trim_end());
    }

    Snippet {
        text: out,
        highlights,
    }
}

/// Append `segment` with each whitespace run replaced by a single space.
fn push_collapsed(out: &mut String, segment: &str) {
    let mut in_space = false;
    for c in segment.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
}

/// Title (or page) prefix, unhighlighted.
pub fn fallback_snippet(doc: &Document) -> Snippet {
    let source = if doc.title.trim().is_empty() {
        doc.page.trim()
    } else {
        doc.title.trim()
    };
    let mut collapsed = String::with_capacity(source.len());
    push_collapsed(&mut collapsed, source);
    Snippet::plain(truncate_chars(&collapsed, FALLBACK_SNIPPET_CHARS))
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", text[..cut].trim_end(), ELLIPSIS),
    }
}
