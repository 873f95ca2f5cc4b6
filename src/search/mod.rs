// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query answering: parse, score, rank, dedupe, then cut snippets.
//!
//! [`Searcher`] owns an immutable index and answers one query at a time.
//! [`SearchSession`] sits on top for interactive use, where every keystroke
//! supersedes the query before it and only the newest result may land.

pub mod dedup;
pub mod query;
pub mod searcher;
pub mod session;
pub mod snippet;

pub use query::{parse_query, resolve_terms, QueryTerms};
pub use searcher::{QueryOptions, RankedQuery, Searcher};
pub use session::{CommitStatus, QueryExecution, QueryTicket, SearchSession, SessionState};
pub use snippet::{fallback_snippet, SnippetExtractor};
