// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Location de-duplication.
//!
//! Generated corpora repeat entries: the same docstring can be emitted once per
//! page that includes it, every copy pointing at the same anchor. With
//! `dedupe_locations` on, only the best-ranked hit per location survives.
//!
//! **Invariant**: runs on *ranked* candidates and before truncation, so the kept
//! copy is always the best one and dropping duplicates never shortens the page
//! below the limit while more distinct hits exist.

use crate::scoring::Candidate;
use crate::types::Document;
use std::collections::HashSet;

/// Keep the first candidate per location. `ranked` must already be in rank order.
pub fn dedupe_by_location(ranked: Vec<Candidate>, docs: &[Document]) -> Vec<Candidate> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(ranked.len());
    ranked
        .into_iter()
        .filter(|candidate| match docs.get(candidate.doc_id.as_usize()) {
            Some(doc) => seen.insert(doc.location.as_str()),
            None => true,
        })
        .collect()
}
