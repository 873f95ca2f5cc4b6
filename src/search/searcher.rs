// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query pipeline: parse → score → rank → snippets.
//!
//! A [`Searcher`] owns one corpus and the index built from it. Both are frozen
//! at construction and shared through an `Arc`, so clones are cheap and any
//! number of threads can query the same searcher without locking.
//!
//! The pipeline is exposed in two stages, [`Searcher::rank_query`] and
//! [`Searcher::render_hits`], so a [`SearchSession`](crate::SearchSession) can
//! drop a superseded query before paying for snippets. [`Searcher::search`] runs
//! both back to back.

use crate::build::{load_corpus_file, parse_corpus, LoadedCorpus};
use crate::config::SearchConfig;
use crate::error::{ConfigError, Error, LoadWarning};
use crate::scoring::{score_candidates, sort_candidates, Bm25Params, Candidate, WeightedTerm};
use crate::search::dedup::dedupe_by_location;
use crate::search::query::{parse_query, resolve_terms};
use crate::search::snippet::SnippetExtractor;
use crate::types::{Category, DocId, Document, InvertedIndex, SearchHit, SearchOutcome};
use crate::util::Tokenizer;
use std::path::Path;
use std::sync::Arc;

/// Per-query knobs layered over the searcher's [`SearchConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Result cap. Never exceeds `max_results`; `None` means `max_results`.
    pub limit: Option<usize>,
    /// Only return documents in these categories. `None` means all.
    pub categories: Option<Vec<Category>>,
}

impl QueryOptions {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            categories: None,
        }
    }

    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = Some(categories.into_iter().collect());
        self
    }

    fn admits(&self, category: Category) -> bool {
        self.categories
            .as_ref()
            .map_or(true, |allowed| allowed.contains(&category))
    }
}

/// A query that has been scored and ranked but not yet given snippets.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedQuery {
    terms: Vec<WeightedTerm>,
    candidates: Vec<Candidate>,
}

impl RankedQuery {
    /// Ranked, truncated candidates.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Index terms the query resolved to.
    pub fn terms(&self) -> &[WeightedTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Thread-safe inner data for the searcher.
#[derive(Debug)]
pub struct SearcherInner {
    documents: Vec<Document>,
    index: InvertedIndex,
    tokenizer: Tokenizer,
    config: SearchConfig,
    warnings: Vec<LoadWarning>,
}

/// An immutable corpus plus its index.
///
/// Thread-safe via Arc: can be cloned and shared across threads.
#[derive(Debug, Clone)]
pub struct Searcher {
    inner: Arc<SearcherInner>,
}

impl Searcher {
    /// Validate `config` and index a loaded corpus.
    ///
    /// Document ids are reassigned to match positions in the corpus, so a corpus
    /// assembled by hand can't break id-indexed lookups.
    pub fn new(corpus: LoadedCorpus, config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let LoadedCorpus {
            mut documents,
            warnings,
        } = corpus;
        for (i, doc) in documents.iter_mut().enumerate() {
            doc.id = DocId(i as u32);
        }

        let tokenizer = Tokenizer::new(config.tokenizer);
        let index = InvertedIndex::build(&documents, &tokenizer);
        tracing::debug!(
            documents = documents.len(),
            skipped = warnings.len(),
            terms = index.term_count(),
            "searcher ready"
        );

        Ok(Searcher {
            inner: Arc::new(SearcherInner {
                documents,
                index,
                tokenizer,
                config,
                warnings,
            }),
        })
    }

    /// Index documents directly, with no load warnings.
    pub fn from_documents(
        documents: Vec<Document>,
        config: SearchConfig,
    ) -> Result<Self, ConfigError> {
        Self::new(
            LoadedCorpus {
                documents,
                warnings: Vec::new(),
            },
            config,
        )
    }

    /// Parse corpus text (any supported wrapper) and index it.
    pub fn from_corpus_text(text: &str, config: SearchConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::new(parse_corpus(text)?, config)?)
    }

    /// Read a corpus file and index it.
    pub fn open(path: impl AsRef<Path>, config: SearchConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::new(load_corpus_file(path)?, config)?)
    }

    /// Run a query end to end.
    ///
    /// `limit` is capped at the configured `max_results`.
    pub fn search(&self, query: &str, limit: usize) -> SearchOutcome {
        self.search_with(query, &QueryOptions::with_limit(limit))
    }

    /// Run a query end to end with filters.
    pub fn search_with(&self, query: &str, options: &QueryOptions) -> SearchOutcome {
        match self.rank_query(query, options) {
            None => SearchOutcome::EmptyQuery,
            Some(ranked) => SearchOutcome::Results(self.render_hits(&ranked)),
        }
    }

    /// Parse, score, filter, rank and truncate. `None` for a query with no terms.
    pub fn rank_query(&self, query: &str, options: &QueryOptions) -> Option<RankedQuery> {
        let inner = &*self.inner;
        let config = &inner.config;

        let parsed = parse_query(query, &inner.tokenizer);
        if parsed.is_empty() {
            return None;
        }

        let terms = resolve_terms(&parsed, &inner.index, config.prefix_last_term);
        let params = Bm25Params::from_config(config);
        let mut candidates = score_candidates(&inner.index, &terms, &params, config.min_score);
        if options.categories.is_some() {
            candidates.retain(|c| {
                self.document(c.doc_id)
                    .is_some_and(|doc| options.admits(doc.category))
            });
        }

        sort_candidates(&mut candidates, &inner.documents);
        if config.dedupe_locations {
            candidates = dedupe_by_location(candidates, &inner.documents);
        }
        candidates.truncate(self.effective_limit(options));

        tracing::trace!(
            query,
            terms = parsed.len(),
            resolved = terms.len(),
            hits = candidates.len(),
            "query ranked"
        );
        Some(RankedQuery { terms, candidates })
    }

    /// Attach documents and snippets to ranked candidates.
    pub fn render_hits(&self, ranked: &RankedQuery) -> Vec<SearchHit> {
        let inner = &*self.inner;
        let extractor =
            SnippetExtractor::new(&inner.index, &inner.tokenizer, inner.config.snippet_window);

        ranked
            .candidates
            .iter()
            .filter_map(|candidate| {
                let doc = self.document(candidate.doc_id)?;
                Some(SearchHit {
                    doc_id: doc.id,
                    location: doc.location.clone(),
                    title: doc.title.clone(),
                    page: doc.page.clone(),
                    category: doc.category,
                    snippet: extractor.extract(doc, &ranked.terms),
                    score: candidate.score,
                })
            })
            .collect()
    }

    fn effective_limit(&self, options: &QueryOptions) -> usize {
        let max = self.inner.config.max_results;
        options.limit.map_or(max, |limit| limit.min(max))
    }

    #[inline]
    pub fn documents(&self) -> &[Document] {
        &self.inner.documents
    }

    #[inline]
    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.inner.documents.get(id.as_usize())
    }

    #[inline]
    pub fn index(&self) -> &InvertedIndex {
        &self.inner.index
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.inner.config
    }

    #[inline]
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.inner.tokenizer
    }

    /// Records skipped while loading the corpus.
    #[inline]
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.inner.warnings
    }

    pub fn len(&self) -> usize {
        self.inner.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.documents.is_empty()
    }
}
