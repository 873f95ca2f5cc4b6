// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus containers.
//!
//! Site generators ship the corpus in one of three wrappers, all accepted here:
//!
//! ```text
//! [{"location": ..., ...}, ...]                           bare array
//! {"docs": [{"location": ..., ...}, ...]}                 object
//! var documenterSearchIndex = {"docs": [ ... ]};          script assignment
//! ```
//!
//! Only a container that can't be parsed at all is an error. Records inside it go
//! through [`load_records`] and fail individually.

use crate::build::document::{load_records, LoadedCorpus};
use crate::error::CorpusError;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Parse corpus text in any of the supported wrappers.
pub fn parse_corpus(text: &str) -> Result<LoadedCorpus, CorpusError> {
    let payload = strip_script_assignment(text.trim_start_matches('\u{feff}').trim());
    let value: Value = serde_json::from_str(payload)?;

    let records = match value {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("docs") {
            Some(Value::Array(records)) => records,
            Some(_) => {
                return Err(CorpusError::MissingRecords {
                    found: "`docs` is not an array",
                })
            }
            None => {
                return Err(CorpusError::MissingRecords {
                    found: "object without `docs`",
                })
            }
        },
        _ => {
            return Err(CorpusError::MissingRecords {
                found: "scalar value",
            })
        }
    };

    Ok(load_records(records))
}

/// Read and parse a corpus file.
pub fn load_corpus_file(path: impl AsRef<Path>) -> Result<LoadedCorpus, CorpusError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read corpus file");
    parse_corpus(&text)
}

/// `var name = <json>;` → `<json>`. JSON input passes through untouched.
fn strip_script_assignment(text: &str) -> &str {
    if text.starts_with('[') || text.starts_with('{') {
        return text;
    }
    let body = match text.find('=') {
        Some(eq) => &text[eq + 1..],
        None => text,
    };
    body.trim().trim_end_matches(';').trim_end()
}
