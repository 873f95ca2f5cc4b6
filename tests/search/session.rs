//! Session lifecycle and supersession tests.

use crate::common::fixture_searcher;
use docseek::{CommitStatus, QueryOptions, SearchConfig, SearchSession, SessionState};
use std::sync::{Arc, Mutex};
use std::thread;

fn session() -> SearchSession {
    SearchSession::new(fixture_searcher(SearchConfig::default()))
}

fn ready_query(session: &SearchSession) -> Option<String> {
    match session.state() {
        SessionState::Ready { query, .. } => Some(query),
        _ => None,
    }
}

#[test]
fn test_typing_sequence_only_surfaces_latest() {
    let session = session();
    let keystrokes = ["v", "vt", "vtk", "vtk_", "vtk_c", "vtk_ce", "vtk_cell"];
    let tickets: Vec<_> = keystrokes
        .iter()
        .map(|q| session.submit(q).unwrap())
        .collect();

    // Complete in reverse: the newest commits first, everything older is stale.
    let mut statuses = Vec::new();
    for ticket in tickets.into_iter().rev() {
        let execution = session.execute(ticket);
        statuses.push(session.commit(execution));
    }

    assert_eq!(statuses[0], CommitStatus::Committed);
    assert!(statuses[1..].iter().all(|s| s.is_superseded()));
    assert_eq!(ready_query(&session).as_deref(), Some("vtk_cell"));
}

#[test]
fn test_q1_never_surfaces_after_q2() {
    let session = session();
    let q1 = session.submit("mesh").unwrap();
    let q2 = session.submit("vtk").unwrap();

    let q1_done = session.execute(q1);
    let q2_done = session.execute(q2);
    assert!(session.commit(q2_done).is_committed());
    assert!(session.commit(q1_done).is_superseded());

    let state = session.state();
    assert_eq!(ready_query(&session).as_deref(), Some("vtk"));
    assert_eq!(state.hits().unwrap().len(), 2);
}

#[test]
fn test_clear_discards_in_flight_and_resets() {
    let session = session();
    session.search("mesh");
    let pending = session.submit("vtk").unwrap();
    assert!(session.submit("").is_none());

    assert_eq!(session.state(), SessionState::Empty);
    assert!(session.commit(session.execute(pending)).is_superseded());
    assert_eq!(session.state(), SessionState::Empty);
}

#[test]
fn test_query_after_clear_starts_fresh() {
    let session = session();
    session.search("mesh");
    session.clear();
    let seq_after_clear = session.latest_seq();

    let ticket = session.submit("args").unwrap();
    assert_eq!(ticket.seq(), seq_after_clear + 1);
    assert!(session.commit(session.execute(ticket)).is_committed());
    assert!(session.state().is_ready());
}

#[test]
fn test_submit_with_options_is_honored() {
    let session = session();
    let ticket = session
        .submit_with("mesh", QueryOptions::with_limit(1))
        .unwrap();
    assert!(session.commit(session.execute(ticket)).is_committed());
    assert_eq!(session.state().hits().unwrap().len(), 1);
}

#[test]
fn test_concurrent_submitters_converge_on_latest() {
    let session = session();
    let log: Arc<Mutex<Vec<(u64, String, CommitStatus)>>> = Arc::new(Mutex::new(Vec::new()));
    let queries = ["mesh", "cells", "vtk", "nodes", "args", "face", "return", "type"];

    let handles: Vec<_> = queries
        .iter()
        .map(|query| {
            let session = session.clone();
            let log = Arc::clone(&log);
            let query = query.to_string();
            thread::spawn(move || {
                let ticket = session.submit(&query).unwrap();
                let seq = ticket.seq();
                let status = session.commit(session.execute(ticket));
                log.lock().unwrap().push((seq, query, status));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let log = log.lock().unwrap();
    let (last_seq, last_query, last_status) = log
        .iter()
        .max_by_key(|(seq, _, _)| *seq)
        .cloned()
        .unwrap();
    assert_eq!(last_seq, session.latest_seq());
    assert_eq!(last_status, CommitStatus::Committed);
    match session.state() {
        SessionState::Ready { seq, query, .. } => {
            assert_eq!(seq, last_seq);
            assert_eq!(query, last_query);
        }
        other => panic!("Session should be ready, got {:?}", other),
    }
}

#[cfg(feature = "parallel")]
#[test]
fn test_background_submissions_settle_on_latest() {
    use std::sync::mpsc;

    let session = session();
    let (tx, rx) = mpsc::channel();
    let mut last = 0;
    for query in ["m", "me", "mes", "mesh"] {
        let tx = tx.clone();
        last = session
            .submit_background(query, move |status| {
                let _ = tx.send(status);
            })
            .unwrap();
    }
    drop(tx);

    let statuses: Vec<CommitStatus> = rx.iter().collect();
    assert_eq!(statuses.len(), 4);
    assert!(statuses.contains(&CommitStatus::Committed));
    match session.state() {
        SessionState::Ready { seq, query, .. } => {
            assert_eq!(seq, last);
            assert_eq!(query, "mesh");
        }
        other => panic!("Session should be ready, got {:?}", other),
    }
}

#[test]
fn test_concurrent_search_calls_return_their_own_results() {
    let session = session();
    let expected_vtk = session.searcher().search("vtk", 20).hits().len();
    assert!(expected_vtk > 0);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let session = session.clone();
            thread::spawn(move || {
                let query = if i % 2 == 0 { "vtk" } else { "mesh" };
                (0..25)
                    .map(|_| (query, session.search(query).hits().len()))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for (query, hits) in handle.join().unwrap() {
            // Supersession never turns a real answer into an empty one.
            assert!(hits > 0, "{} came back empty", query);
            if query == "vtk" {
                assert_eq!(hits, expected_vtk);
            }
        }
    }
    assert!(session.state().is_ready());
}
