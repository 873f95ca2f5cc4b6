// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored candidates get sorted.
//!
//! Score decides. Category and load order only break *exact* ties, so ranking
//! never depends on hash order or sort stability.
//!
//! Sort order:
//! 1. **Score** - descending
//! 2. **Category priority** - page > section > method/function/type > other
//! 3. **Doc ID** - ascending (load order)

use crate::scoring::core::Candidate;
use crate::types::{Category, Document};
use std::cmp::Ordering;

/// Compare two candidates for ranking. `Ordering::Less` means `a` ranks first.
///
/// `docs` is indexed by doc id; a candidate pointing outside it is treated as
/// [`Category::Other`].
pub fn compare_candidates(a: &Candidate, b: &Candidate, docs: &[Document]) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| category_of(a, docs).priority().cmp(&category_of(b, docs).priority()))
        .then_with(|| a.doc_id.cmp(&b.doc_id))
}

fn category_of(candidate: &Candidate, docs: &[Document]) -> Category {
    docs.get(candidate.doc_id.as_usize())
        .map_or(Category::Other, |doc| doc.category)
}

/// Sort candidates into final rank order.
pub fn sort_candidates(candidates: &mut [Candidate], docs: &[Document]) {
    candidates.sort_unstable_by(|a, b| compare_candidates(a, b, docs));
}

/// Sort and truncate to `limit`. Anything past the cutoff is dropped.
pub fn rank(mut candidates: Vec<Candidate>, docs: &[Document], limit: usize) -> Vec<Candidate> {
    sort_candidates(&mut candidates, docs);
    candidates.truncate(limit);
    candidates
}
