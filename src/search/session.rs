// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search sessions: many queries against one searcher, newest wins.
//!
//! A session is what sits behind a search box. Every keystroke submits a query
//! and gets a sequence number. Executions run without holding any lock, and when
//! one finishes it may only commit if its number is still the latest issued.
//! Anything older is dropped on the floor. That's the whole cancellation story:
//! no abort signals, just supersession.
//!
//! ```text
//! Empty ──submit──▶ Searching ──commit──▶ Ready
//!   ▲                  │  ▲                 │
//!   │                  │  └─────submit──────┘
//!   └──clear / blank───┴────────────────────┘
//! ```
//!
//! Executions poll their own currency between pipeline stages. A superseded
//! execution stops before snippet extraction and can't commit anyway.
//!
//! # Usage
//!
//! ```
//! use docseek::{SearchConfig, SearchSession, Searcher, SessionState};
//!
//! let corpus = r##"[{"location": "#a", "title": "Alpha", "category": "page"}]"##;
//! let searcher = Searcher::from_corpus_text(corpus, SearchConfig::default()).unwrap();
//! let session = SearchSession::new(searcher);
//!
//! let first = session.submit("alph").unwrap();
//! let second = session.submit("alpha").unwrap();
//!
//! let stale = session.execute(first);
//! let fresh = session.execute(second);
//! assert!(session.commit(stale).is_superseded());
//! assert!(session.commit(fresh).is_committed());
//!
//! match session.state() {
//!     SessionState::Ready { query, outcome, .. } => {
//!         assert_eq!(query, "alpha");
//!         assert_eq!(outcome.hits().len(), 1);
//!     }
//!     other => panic!("unexpected state {:?}", other),
//! }
//! ```

use crate::search::searcher::{QueryOptions, Searcher};
use crate::types::{SearchHit, SearchOutcome};
use parking_lot::Mutex;
use std::sync::Arc;

/// Where a session is in its query lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No query, or the query was cleared.
    Empty,
    /// The latest query is in flight.
    Searching { seq: u64, query: String },
    /// Results for the latest query are available.
    Ready {
        seq: u64,
        query: String,
        outcome: SearchOutcome,
    },
}

impl SessionState {
    /// Hits of a `Ready` state.
    pub fn hits(&self) -> Option<&[SearchHit]> {
        match self {
            SessionState::Ready { outcome, .. } => Some(outcome.hits()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SessionState::Empty)
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, SessionState::Searching { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready { .. })
    }
}

/// A submitted query, waiting to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    seq: u64,
    query: String,
    options: QueryOptions,
}

impl QueryTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// The result of running a ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryExecution {
    seq: u64,
    query: String,
    /// `None` when the execution noticed it was superseded and stopped early.
    outcome: Option<SearchOutcome>,
}

impl QueryExecution {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// True when the execution stopped early.
    pub fn is_abandoned(&self) -> bool {
        self.outcome.is_none()
    }
}

/// What [`SearchSession::commit`] did with an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStatus {
    /// The session is now `Ready` with this execution's results.
    Committed,
    /// A newer query (or a clear) was issued; the results were discarded.
    Superseded,
}

impl CommitStatus {
    pub fn is_committed(self) -> bool {
        self == CommitStatus::Committed
    }

    pub fn is_superseded(self) -> bool {
        self == CommitStatus::Superseded
    }
}

/// Bookkeeping guarded by the session lock.
#[derive(Debug)]
struct SessionShared {
    latest_seq: u64,
    state: SessionState,
}

/// Sequence-numbered query handling over one [`Searcher`].
///
/// Clones share the same state, so a clone can be moved into a worker that
/// commits results back.
#[derive(Debug, Clone)]
pub struct SearchSession {
    searcher: Searcher,
    shared: Arc<Mutex<SessionShared>>,
}

impl SearchSession {
    pub fn new(searcher: Searcher) -> Self {
        Self {
            searcher,
            shared: Arc::new(Mutex::new(SessionShared {
                latest_seq: 0,
                state: SessionState::Empty,
            })),
        }
    }

    #[inline]
    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.shared.lock().state.clone()
    }

    /// Highest sequence number issued so far (clears included).
    pub fn latest_seq(&self) -> u64 {
        self.shared.lock().latest_seq
    }

    /// Whether `seq` is still the newest query.
    pub fn is_current(&self, seq: u64) -> bool {
        self.shared.lock().latest_seq == seq
    }

    /// Issue a new query with default options. See [`SearchSession::submit_with`].
    pub fn submit(&self, query: &str) -> Option<QueryTicket> {
        self.submit_with(query, QueryOptions::default())
    }

    /// Issue a new query, superseding everything before it.
    ///
    /// A blank query clears the session instead and returns `None`.
    pub fn submit_with(&self, query: &str, options: QueryOptions) -> Option<QueryTicket> {
        if query.trim().is_empty() {
            self.clear();
            return None;
        }

        let mut shared = self.shared.lock();
        shared.latest_seq += 1;
        let seq = shared.latest_seq;
        shared.state = SessionState::Searching {
            seq,
            query: query.to_string(),
        };
        drop(shared);

        tracing::trace!(seq, query, "query submitted");
        Some(QueryTicket {
            seq,
            query: query.to_string(),
            options,
        })
    }

    /// Move to `Empty` and invalidate any in-flight query.
    pub fn clear(&self) {
        let mut shared = self.shared.lock();
        shared.latest_seq += 1;
        shared.state = SessionState::Empty;
        tracing::trace!(seq = shared.latest_seq, "session cleared");
    }

    /// Run a ticket through the pipeline. Never holds the session lock while
    /// searching.
    pub fn execute(&self, ticket: QueryTicket) -> QueryExecution {
        let QueryTicket {
            seq,
            query,
            options,
        } = ticket;
        let abandoned = |query: String| QueryExecution {
            seq,
            query,
            outcome: None,
        };

        if !self.is_current(seq) {
            return abandoned(query);
        }

        let outcome = match self.searcher.rank_query(&query, &options) {
            None => SearchOutcome::EmptyQuery,
            Some(ranked) => {
                // Snippets are the expensive part; skip them for a dead query.
                if !self.is_current(seq) {
                    return abandoned(query);
                }
                SearchOutcome::Results(self.searcher.render_hits(&ranked))
            }
        };

        QueryExecution {
            seq,
            query,
            outcome: Some(outcome),
        }
    }

    /// Run a ticket through the whole pipeline, superseded or not.
    ///
    /// The execution always carries an outcome; [`SearchSession::commit`] still
    /// refuses it unless it is the latest query.
    pub fn execute_to_completion(&self, ticket: QueryTicket) -> QueryExecution {
        let QueryTicket {
            seq,
            query,
            options,
        } = ticket;
        let outcome = self.searcher.search_with(&query, &options);
        QueryExecution {
            seq,
            query,
            outcome: Some(outcome),
        }
    }

    /// Publish an execution's results if it is still the latest query.
    pub fn commit(&self, execution: QueryExecution) -> CommitStatus {
        let mut shared = self.shared.lock();
        match execution.outcome {
            Some(outcome) if execution.seq == shared.latest_seq => {
                shared.state = SessionState::Ready {
                    seq: execution.seq,
                    query: execution.query,
                    outcome,
                };
                CommitStatus::Committed
            }
            _ => {
                tracing::debug!(
                    seq = execution.seq,
                    latest = shared.latest_seq,
                    "discarding stale query execution"
                );
                CommitStatus::Superseded
            }
        }
    }

    /// Submit, execute and commit in one call.
    ///
    /// Returns the query's own outcome even if a concurrent caller superseded it
    /// before commit; the session state then keeps the newer query. A blank query
    /// clears the session.
    pub fn search(&self, query: &str) -> SearchOutcome {
        let Some(ticket) = self.submit(query) else {
            return SearchOutcome::EmptyQuery;
        };
        let execution = self.execute_to_completion(ticket);
        let outcome = execution
            .outcome
            .clone()
            .unwrap_or(SearchOutcome::EmptyQuery);
        self.commit(execution);
        outcome
    }

    /// Submit a query and run it on the rayon pool.
    ///
    /// `on_complete` receives the commit status once the execution finishes.
    /// Returns the sequence number, or `None` for a blank query (which clears the
    /// session and never calls `on_complete`).
    #[cfg(feature = "parallel")]
    pub fn submit_background<F>(&self, query: &str, on_complete: F) -> Option<u64>
    where
        F: FnOnce(CommitStatus) + Send + 'static,
    {
        let ticket = self.submit(query)?;
        let seq = ticket.seq();
        let session = self.clone();
        rayon::spawn(move || {
            let execution = session.execute(ticket);
            on_complete(session.commit(execution));
        });
        Some(seq)
    }
}
