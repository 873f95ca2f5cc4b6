// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The one tokenizer.
//!
//! Indexing and querying must cut text identically, or valid queries silently stop
//! matching. Both go through [`Tokenizer::tokenize`] with the same configuration; the
//! [`Searcher`](crate::Searcher) owns a single instance and hands it to both sides.
//!
//! Rules: split on every non-alphanumeric character, normalize each word (lowercase,
//! optional diacritic folding), drop empties, then optionally drop stop words and stem.
//! Positions count emitted tokens only, so a dropped stop word doesn't leave a gap.

use crate::config::TokenizerConfig;
use crate::util::normalize::normalize_word;
use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::LazyLock;

/// Stop words loaded from data/stop_words.json, all languages flattened.
static STOP_WORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let json_str = include_str!("../../data/stop_words.json");
    parse_stop_words_json(json_str)
});

#[cfg(feature = "stemming")]
static STEMMER: LazyLock<rust_stemmers::Stemmer> =
    LazyLock::new(|| rust_stemmers::Stemmer::create(rust_stemmers::Algorithm::English));

/// Parse `{ "lang": ["word", ...], ... }` into a single lowercase set.
fn parse_stop_words_json(json_str: &str) -> HashSet<String> {
    let by_language: HashMap<String, Vec<String>> =
        serde_json::from_str(json_str).unwrap_or_default();
    by_language
        .into_values()
        .flatten()
        .map(|word| word.to_lowercase())
        .collect()
}

/// Check if a normalized word is a stop word.
#[inline]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// One normalized term occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub term: String,
    /// Ordinal among the emitted tokens of the same string
    pub position: u32,
    /// Byte range of the source word
    pub span: Range<usize>,
}

/// Splits field text and queries into terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        Tokenizer { config }
    }

    pub fn config(&self) -> TokenizerConfig {
        self.config
    }

    /// Tokenize text into terms with positions and source spans.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for span in word_spans(text) {
            if let Some(term) = self.term_for(&text[span.clone()]) {
                tokens.push(Token {
                    term,
                    position: tokens.len() as u32,
                    span,
                });
            }
        }
        tokens
    }

    /// Just the terms, in order.
    pub fn terms(&self, text: &str) -> Vec<String> {
        word_spans(text)
            .filter_map(|span| self.term_for(&text[span]))
            .collect()
    }

    /// Normalize one raw word. `None` when the word is dropped.
    fn term_for(&self, word: &str) -> Option<String> {
        let normalized = normalize_word(word, self.config.fold_diacritics);
        if normalized.is_empty() {
            return None;
        }
        if self.config.stop_words && is_stop_word(&normalized) {
            return None;
        }
        Some(self.stem(normalized))
    }

    #[cfg(feature = "stemming")]
    fn stem(&self, term: String) -> String {
        if self.config.stemming {
            STEMMER.stem(&term).into_owned()
        } else {
            term
        }
    }

    #[cfg(not(feature = "stemming"))]
    fn stem(&self, term: String) -> String {
        term
    }
}

/// Byte spans of maximal alphanumeric runs.
fn word_spans(text: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    let mut chars = text.char_indices().peekable();
    std::iter::from_fn(move || {
        // Skip separators
        while let Some(&(_, c)) = chars.peek() {
            if c.is_alphanumeric() {
                break;
            }
            chars.next();
        }
        let (start, first) = chars.next()?;
        let mut end = start + first.len_utf8();
        while let Some(&(i, c)) = chars.peek() {
            if !c.is_alphanumeric() {
                break;
            }
            end = i + c.len_utf8();
            chars.next();
        }
        Some(start..end)
    })
}
