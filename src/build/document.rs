// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Record validation: raw corpus entries in, typed [`Document`]s out.
//!
//! The loader never fails. A record that can't become a document is skipped and
//! reported as a [`LoadWarning`]; everything else gets the next sequential id.

use crate::error::{LoadWarning, SkipReason};
use crate::types::{Category, DocId, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One corpus entry exactly as the site generator writes it.
///
/// Unknown keys are ignored. Every key is optional here; [`load_records`] decides
/// which absences are fatal to the record.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRecord {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// The result of loading a corpus: accepted documents plus what was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedCorpus {
    pub documents: Vec<Document>,
    pub warnings: Vec<LoadWarning>,
}

impl LoadedCorpus {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Validate raw JSON records into documents, in order.
pub fn load_records<I>(records: I) -> LoadedCorpus
where
    I: IntoIterator<Item = Value>,
{
    let mut corpus = LoadedCorpus::default();

    for (record, value) in records.into_iter().enumerate() {
        let next_id = DocId(corpus.documents.len() as u32);
        match document_from_value(next_id, value) {
            Ok(document) => corpus.documents.push(document),
            Err(reason) => {
                tracing::warn!(record, %reason, "skipping corpus record");
                corpus.warnings.push(LoadWarning { record, reason });
            }
        }
    }

    tracing::debug!(
        documents = corpus.documents.len(),
        skipped = corpus.warnings.len(),
        "corpus loaded"
    );
    corpus
}

/// Validate already-deserialized records.
pub fn load_raw_records<I>(records: I) -> LoadedCorpus
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut corpus = LoadedCorpus::default();

    for (record, raw) in records.into_iter().enumerate() {
        let next_id = DocId(corpus.documents.len() as u32);
        match document_from_raw(next_id, raw) {
            Ok(document) => corpus.documents.push(document),
            Err(reason) => {
                tracing::warn!(record, %reason, "skipping corpus record");
                corpus.warnings.push(LoadWarning { record, reason });
            }
        }
    }
    corpus
}

fn document_from_value(id: DocId, value: Value) -> Result<Document, SkipReason> {
    let Value::Object(mut map) = value else {
        return Err(SkipReason::NotAnObject);
    };

    // Check the known keys by hand so the warning can name the offending field.
    // A null counts as absent.
    let mut take = |field: &'static str| -> Result<Option<String>, SkipReason> {
        match map.remove(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(SkipReason::NotAString { field }),
        }
    };

    let raw = RawRecord {
        location: take("location")?,
        page: take("page")?,
        title: take("title")?,
        text: take("text")?,
        category: take("category")?,
    };
    document_from_raw(id, raw)
}

fn document_from_raw(id: DocId, raw: RawRecord) -> Result<Document, SkipReason> {
    let location = raw.location.ok_or(SkipReason::MissingLocation)?;
    if location.is_empty() {
        return Err(SkipReason::EmptyLocation {
            page: raw.page.unwrap_or_default(),
        });
    }
    let title = raw.title.ok_or(SkipReason::MissingTitle)?;
    let category = raw
        .category
        .as_deref()
        .map_or(Category::Other, Category::from_tag);

    Ok(Document {
        id,
        location,
        page: raw.page.unwrap_or_default(),
        title,
        text: raw.text.unwrap_or_default(),
        category,
    })
}
