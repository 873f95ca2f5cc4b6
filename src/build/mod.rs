// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus loading: container parsing and record validation.

pub mod corpus;
pub mod document;

pub use corpus::*;
pub use document::*;
