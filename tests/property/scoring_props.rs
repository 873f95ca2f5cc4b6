//! Ranking properties over random corpora and queries.

use crate::common::{assert_highlights_valid, assert_ranked, make_doc, make_docs};
use docseek::scoring::{idf, tf_component};
use docseek::{DocId, SearchConfig, SearchSession, Searcher};
use proptest::prelude::*;

const VOCAB: [&str; 8] = ["mesh", "cell", "face", "node", "grid", "field", "vtk", "args"];

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB.to_vec()), 0..20).prop_map(|w| w.join(" "))
}

fn corpus_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((text_strategy(), text_strategy()), 1..15)
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB.to_vec()), 1..4).prop_map(|w| w.join(" "))
}

fn searcher(corpus: &[(String, String)], config: SearchConfig) -> Searcher {
    let pairs: Vec<(&str, &str)> = corpus.iter().map(|(t, x)| (t.as_str(), x.as_str())).collect();
    Searcher::from_documents(make_docs(&pairs), config).unwrap()
}

proptest! {
    #[test]
    fn prop_results_ranked_and_valid(corpus in corpus_strategy(), query in query_strategy()) {
        let searcher = searcher(&corpus, SearchConfig::default());
        let hits = searcher.search(&query, 20).into_hits();
        assert_ranked(&hits);
        for hit in &hits {
            assert_highlights_valid(hit);
            prop_assert!(hit.score > 0.0);
        }
    }

    #[test]
    fn prop_every_hit_matches_a_term(corpus in corpus_strategy(), query in query_strategy()) {
        let searcher = searcher(&corpus, SearchConfig::default());
        let terms: Vec<&str> = query.split(' ').collect();
        for hit in searcher.search(&query, 20).hits() {
            let doc = searcher.document(hit.doc_id).unwrap();
            let words: Vec<&str> = doc.title.split(' ').chain(doc.text.split(' ')).collect();
            prop_assert!(terms.iter().any(|t| words.contains(t)));
        }
    }

    #[test]
    fn prop_matching_doc_count_is_exact(corpus in corpus_strategy(), term in prop::sample::select(VOCAB.to_vec())) {
        let searcher = searcher(&corpus, SearchConfig::default());
        let expected = corpus
            .iter()
            .filter(|(t, x)| t.split(' ').chain(x.split(' ')).any(|w| w == term))
            .count();
        let hits = searcher.search(term, 1000).into_hits();
        prop_assert_eq!(hits.len(), expected.min(20));
    }

    #[test]
    fn prop_title_occurrence_ranks_at_or_above_text_occurrence(
        filler in prop::collection::vec(prop::sample::select(VOCAB.to_vec()), 0..10),
        boost in 1.0f64..10.0,
    ) {
        let body = filler.join(" ");
        let docs = vec![
            make_doc(0, "zeta", &format!("{} pad", body)),
            make_doc(1, "pad", &format!("{} zeta", body)),
        ];
        let config = SearchConfig { title_boost: boost, ..SearchConfig::default() };
        let searcher = Searcher::from_documents(docs, config).unwrap();
        let hits = searcher.search("zeta", 10).into_hits();
        prop_assert_eq!(hits.len(), 2);
        prop_assert_eq!(hits[0].doc_id, DocId(0));
    }

    #[test]
    fn prop_more_occurrences_never_score_lower(tf in 1u32..50, len in 1u32..100, avg in 1.0f64..50.0) {
        let base = tf_component(tf, len.max(tf), avg, 1.2, 0.75);
        let more = tf_component(tf + 1, len.max(tf), avg, 1.2, 0.75);
        prop_assert!(more >= base);
    }

    #[test]
    fn prop_idf_positive_and_decreasing(n in 1usize..10_000, df in 1usize..10_000) {
        let df = df.min(n);
        prop_assert!(idf(n, df) > 0.0);
        if df < n {
            prop_assert!(idf(n, df) >= idf(n, df + 1));
        }
    }

    #[test]
    fn prop_session_commits_only_latest(
        corpus in corpus_strategy(),
        queries in prop::collection::vec(query_strategy(), 1..6),
        order in any::<prop::sample::Index>(),
    ) {
        let session = SearchSession::new(searcher(&corpus, SearchConfig::default()));
        let mut tickets: Vec<_> = queries.iter().map(|q| session.submit(q).unwrap()).collect();
        let latest = tickets.last().map(|t| t.seq()).unwrap();

        // Rotate the completion order so the latest doesn't always finish last.
        let shift = order.index(tickets.len());
        tickets.rotate_left(shift);
        for ticket in tickets {
            let seq = ticket.seq();
            let status = session.commit(session.execute(ticket));
            prop_assert_eq!(status.is_committed(), seq == latest);
        }
        prop_assert!(session.state().is_ready());
    }
}
