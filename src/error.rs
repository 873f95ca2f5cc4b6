// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Only configuration and unreadable corpus containers are errors. A bad record is
//! a [`LoadWarning`], an empty query is [`SearchOutcome::EmptyQuery`], and a query
//! with no matches is an empty result list. None of those abort a session.
//!
//! [`SearchOutcome::EmptyQuery`]: crate::SearchOutcome::EmptyQuery

use std::path::PathBuf;

/// A tuning parameter was rejected. Fatal to the configuration call only.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A numeric parameter is out of range or not finite.
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A count parameter that must be at least one was zero.
    #[error("{name} must be at least 1")]
    Zero { name: &'static str },

    /// The option needs a cargo feature this build doesn't have.
    #[error("{option} requires the `{feature}` feature")]
    FeatureDisabled {
        option: &'static str,
        feature: &'static str,
    },

    /// The JSON configuration didn't parse.
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The corpus container itself could not be read.
///
/// Per-record problems never end up here; they are collected as warnings.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read corpus from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed, but there was no record array where one was expected.
    #[error("corpus has no record array ({found})")]
    MissingRecords { found: &'static str },
}

/// Why a corpus record was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("record is not an object")]
    NotAnObject,
    #[error("missing `location`")]
    MissingLocation,
    /// Page-level entries often carry `""`; their title and body are dropped.
    #[error("`location` is empty; entry on page {page:?} is not searchable")]
    EmptyLocation { page: String },
    #[error("missing `title`")]
    MissingTitle,
    /// A known key holds something other than a string.
    #[error("`{field}` is not a string")]
    NotAString { field: &'static str },
}

/// A skipped corpus record, reported after loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record {record}: {reason}")]
pub struct LoadWarning {
    /// Zero-based position of the record in the raw corpus
    pub record: usize,
    pub reason: SkipReason,
}

/// Anything that can stop a [`Searcher`](crate::Searcher) from being built.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Corpus(#[from] CorpusError),
}
