// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text processing shared by indexing and querying.

pub mod normalize;
pub mod tokenize;

pub use tokenize::{is_stop_word, Token, Tokenizer};
