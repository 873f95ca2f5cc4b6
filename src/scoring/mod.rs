// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers and their order.
//!
//! Scores are plain BM25 with a title boost. Category only matters when two
//! scores are exactly equal.

mod core;
pub mod ranking;

pub use self::core::*;
pub use ranking::{compare_candidates, rank, sort_candidates};
