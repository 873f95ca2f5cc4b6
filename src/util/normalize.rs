// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-word normalization: lowercase, optionally strip diacritics.
//!
//! With folding enabled, accented and plain spellings meet in the same term:
//! - "café" → "cafe"
//! - "tummalachērla" → "tummalacherla"
//! - "naïve" → "naive"
//!
//! # Algorithm (with folding)
//!
//! 1. NFD normalize (decompose characters into base + combining marks)
//! 2. Filter out combining marks
//! 3. Lowercase

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Lowercase a word, folding diacritics first when asked to.
///
/// Without the `unicode-normalization` feature `fold` is ignored; configuration
/// validation refuses to enable it in that build.
pub fn normalize_word(word: &str, fold: bool) -> String {
    if fold {
        fold_diacritics(word).to_lowercase()
    } else {
        word.to_lowercase()
    }
}

#[cfg(feature = "unicode-normalization")]
fn fold_diacritics(word: &str) -> String {
    word.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(not(feature = "unicode-normalization"))]
fn fold_diacritics(word: &str) -> String {
    word.to_string()
}

/// Check if a character is a combining mark (diacritic).
///
/// Covers the common nonspacing mark blocks. Examples: ́ (acute), ̄ (macron),
/// ̣ (dot below).
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
