// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tuning parameters.
//!
//! BM25 constants, title weighting, snippet width and tokenizer switches.
//! Validation happens once, when a [`Searcher`](crate::Searcher) is constructed;
//! after that the numbers are trusted.
//!
//! JSON keys are camelCase and every key is optional:
//!
//! ```
//! use docseek::SearchConfig;
//!
//! let config = SearchConfig::from_json(r#"{ "titleBoost": 5.0, "maxResults": 10 }"#).unwrap();
//! assert_eq!(config.title_boost, 5.0);
//! assert_eq!(config.k1, 1.2);
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default maximum number of results per query.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// BM25 term frequency saturation. Standard range 1.0–2.0.
pub const DEFAULT_K1: f64 = 1.2;

/// BM25 length normalization. 0.0 = none, 1.0 = full.
pub const DEFAULT_B: f64 = 0.75;

/// Multiplier applied to title-field contributions.
pub const DEFAULT_TITLE_BOOST: f64 = 3.0;

/// Snippet window width, in tokens.
pub const DEFAULT_SNIPPET_WINDOW: usize = 30;

/// How text is cut into terms. Shared by indexing and querying.
///
/// Everything is off by default so terms match the corpus literally (modulo case).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenizerConfig {
    /// Drop common English words (`data/stop_words.json`)
    pub stop_words: bool,
    /// Snowball English stemming. Requires the `stemming` feature.
    pub stemming: bool,
    /// Fold accents (`café` → `cafe`). Requires the `unicode-normalization` feature.
    pub fold_diacritics: bool,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub max_results: usize,
    pub k1: f64,
    pub b: f64,
    pub title_boost: f64,
    pub snippet_window: usize,
    /// Results scoring strictly below this are dropped
    pub min_score: f64,
    /// Expand the last query term to every indexed term it prefixes
    pub prefix_last_term: bool,
    /// Keep only the best-ranked hit per location
    pub dedupe_locations: bool,
    pub tokenizer: TokenizerConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_results: DEFAULT_MAX_RESULTS,
            k1: DEFAULT_K1,
            b: DEFAULT_B,
            title_boost: DEFAULT_TITLE_BOOST,
            snippet_window: DEFAULT_SNIPPET_WINDOW,
            min_score: 0.0,
            prefix_last_term: false,
            dedupe_locations: false,
            tokenizer: TokenizerConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Parse and validate a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter. Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::Zero {
                name: "maxResults",
            });
        }
        if self.snippet_window == 0 {
            return Err(ConfigError::Zero {
                name: "snippetWindow",
            });
        }
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "k1",
                value: self.k1,
                reason: "must be finite and non-negative",
            });
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(ConfigError::InvalidParameter {
                name: "b",
                value: self.b,
                reason: "must be within [0, 1]",
            });
        }
        if !self.title_boost.is_finite() || self.title_boost <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "titleBoost",
                value: self.title_boost,
                reason: "must be finite and positive",
            });
        }
        if !self.min_score.is_finite() || self.min_score < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "minScore",
                value: self.min_score,
                reason: "must be finite and non-negative",
            });
        }
        self.tokenizer.validate()
    }
}

impl TokenizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stemming && !cfg!(feature = "stemming") {
            return Err(ConfigError::FeatureDisabled {
                option: "tokenizer.stemming",
                feature: "stemming",
            });
        }
        if self.fold_diacritics && !cfg!(feature = "unicode-normalization") {
            return Err(ConfigError::FeatureDisabled {
                option: "tokenizer.foldDiacritics",
                feature: "unicode-normalization",
            });
        }
        Ok(())
    }
}
