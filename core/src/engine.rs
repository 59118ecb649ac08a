use crate::boolean::boolean_retrieve;
use crate::corpus::{load_corpus, Corpus, LoadOptions};
use crate::error::SearchError;
use crate::index::{DocId, InvertedIndex};
use crate::query::{Query, QueryMode};
use crate::ranked::{ScoredDoc, Scorer};
use crate::stats::TermStatistics;
use crate::tokenizer::stem;
use crate::weights::TfIdfTable;
use anyhow::Result;
use std::path::Path;

/// The built, read-only index over one corpus and the query API on top of it.
#[derive(Debug, Clone)]
pub struct IrSystem {
    titles: Vec<String>,
    index: InvertedIndex,
    stats: TermStatistics,
    weights: TfIdfTable,
}

/// Outcome of [`IrSystem::search`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
    Boolean(Vec<DocId>),
    Ranked(Vec<ScoredDoc>),
}

impl IrSystem {
    pub fn build(corpus: Corpus) -> Self {
        tracing::info!(num_docs = corpus.len(), "indexing");
        let index = InvertedIndex::build(&corpus);
        tracing::info!(num_terms = index.len(), "computing tf-idf");
        let stats = TermStatistics::compute(&corpus);
        let weights = TfIdfTable::build(&index, &stats);
        Self { titles: corpus.into_titles(), index, stats, weights }
    }

    /// Load the corpus under `data_dir` and index it. Any load failure aborts
    /// before an index exists.
    pub fn load(data_dir: &Path, opts: &LoadOptions) -> Result<Self> {
        let corpus = load_corpus(data_dir, opts)?;
        Ok(Self::build(corpus))
    }

    pub fn num_docs(&self) -> usize {
        self.titles.len()
    }

    pub fn title_of(&self, doc: DocId) -> Option<&str> {
        self.titles.get(doc as usize).map(String::as_str)
    }

    pub fn vocabulary(&self) -> &[String] {
        self.index.vocabulary()
    }

    pub fn posting(&self, term: &str) -> &[DocId] {
        self.index.postings(term)
    }

    /// Posting list for a raw word, stemmed first.
    pub fn posting_unstemmed(&self, word: &str) -> &[DocId] {
        self.index.postings(&stem(&word.to_lowercase()))
    }

    pub fn term_frequency(&self, doc: DocId, term: &str) -> u32 {
        self.stats.term_frequency(doc, term)
    }

    pub fn document_frequency(&self, term: &str) -> u32 {
        self.stats.document_frequency(term)
    }

    pub fn document_length(&self, doc: DocId) -> u32 {
        self.stats.document_length(doc)
    }

    pub fn tfidf(&self, term: &str, doc: DocId) -> f64 {
        self.weights.weight(&self.stats, term, doc)
    }

    pub fn tfidf_unstemmed(&self, word: &str, doc: DocId) -> f64 {
        self.tfidf(&stem(&word.to_lowercase()), doc)
    }

    pub fn scorer(&self) -> Scorer<'_> {
        Scorer::new(&self.index, &self.stats, &self.weights)
    }

    pub fn boolean_search(&self, raw: &str) -> Result<Vec<DocId>, SearchError> {
        let query = Query::parse(raw);
        let docs = boolean_retrieve(&self.index, query.terms())?;
        tracing::debug!(query = raw, terms = ?query.terms(), hits = docs.len(), "boolean search");
        Ok(docs)
    }

    pub fn ranked_search(&self, raw: &str) -> Vec<ScoredDoc> {
        let query = Query::parse(raw);
        let ranked = self.scorer().rank(query.terms());
        tracing::debug!(query = raw, terms = ?query.terms(), hits = ranked.len(), "ranked search");
        ranked
    }

    pub fn ranked_search_top(&self, raw: &str, k: usize) -> Vec<ScoredDoc> {
        let mut ranked = self.ranked_search(raw);
        ranked.truncate(k);
        ranked
    }

    pub fn search(&self, raw: &str, mode: QueryMode) -> Result<SearchResults, SearchError> {
        match mode {
            QueryMode::Boolean => self.boolean_search(raw).map(SearchResults::Boolean),
            QueryMode::Ranked => Ok(SearchResults::Ranked(self.ranked_search(raw))),
        }
    }
}
