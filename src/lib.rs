//! Embedded full-text search for generated documentation sites.
//!
//! A documentation generator emits a flat corpus: one record per page, section
//! and API entry, each with an anchor, the containing page, a title, body text
//! and a category. This crate loads that corpus, builds a field-aware inverted
//! index, and answers free-text queries with BM25-ranked, highlighted results.
//! Everything runs in-process; there is no server and no global state.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌───────────────┐
//! │    build     │────▶│   inverted   │────▶│    search     │
//! │ (corpus,     │     │ (postings,   │     │ (query, rank, │
//! │  documents)  │     │  lengths)    │     │  snippets)    │
//! └──────────────┘     └──────────────┘     └───────────────┘
//!        │                    │                     │
//!        ▼                    ▼                     ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │     util::tokenize (one tokenizer for both sides)       │
//! │     scoring (BM25, tie-breaks)   verify (invariants)    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! | Module      | Responsibility                                        |
//! |-------------|-------------------------------------------------------|
//! | `build`     | Corpus wrappers, record validation, load warnings     |
//! | `inverted`  | Index construction (sequential and rayon)             |
//! | `scoring`   | BM25 per field, deterministic ranking                 |
//! | `search`    | Query parsing, snippets, the searcher, sessions       |
//! | `verify`    | Runtime index invariant checks                        |
//! | `config`    | Tunables and their validation                         |
//!
//! # Usage
//!
//! ```
//! use docseek::{SearchConfig, SearchOutcome, Searcher};
//!
//! let corpus = r##"var documenterSearchIndex = {"docs":[
//!   {"location":"#mesh","page":"Guide","title":"Mesh","text":"A mesh is a set of cells.","category":"section"},
//!   {"location":"#cells","page":"API","title":"num_cells","text":"Number of cells in a mesh.","category":"function"}
//! ]};"##;
//!
//! let searcher = Searcher::from_corpus_text(corpus, SearchConfig::default()).unwrap();
//! let hits = searcher.search("mesh", 10).into_hits();
//! assert_eq!(hits[0].location, "#mesh");
//! assert_eq!(hits.len(), 2);
//!
//! assert_eq!(searcher.search("   ", 10), SearchOutcome::EmptyQuery);
//! ```
//!
//! # Logging
//!
//! The crate emits `tracing` events (skipped records, index statistics, stale
//! query executions) and never installs a subscriber.

pub mod build;
pub mod config;
pub mod error;
pub mod inverted;
pub mod scoring;
pub mod search;
pub mod types;
pub mod util;
pub mod verify;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use build::{
    load_corpus_file, load_raw_records, load_records, parse_corpus, LoadedCorpus, RawRecord,
};
pub use config::{SearchConfig, TokenizerConfig};
pub use error::{ConfigError, CorpusError, Error, LoadWarning, SkipReason};
pub use scoring::{Bm25Params, Candidate, WeightedTerm};
pub use search::{
    CommitStatus, QueryExecution, QueryOptions, QueryTicket, RankedQuery, SearchSession,
    Searcher, SessionState,
};
pub use types::{
    Category, DocId, Document, Field, FieldLengths, Highlight, InvertedIndex, Posting,
    PostingList, SearchHit, SearchOutcome, Snippet,
};
pub use util::{Token, Tokenizer};
pub use verify::{validate_index, InvariantError};
