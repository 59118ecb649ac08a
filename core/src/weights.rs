//! Log-damped local term weights. IDF is kept out of the stored table and
//! applied per lookup, see [`TfIdfTable::weight`].

use crate::index::{DocId, InvertedIndex};
use crate::stats::TermStatistics;
use std::collections::HashMap;

/// `1 + log10(f)` for `f > 0`, else 0.
pub fn log_tf(freq: u32) -> f64 {
    if freq == 0 {
        0.0
    } else {
        (freq as f64).log10() + 1.0
    }
}

#[derive(Debug, Default, Clone)]
pub struct TfIdfTable {
    /// term → (doc id, local weight), sorted by doc id. Missing pairs weigh 0.
    local: HashMap<String, Vec<(DocId, f64)>>,
}

impl TfIdfTable {
    pub fn build(index: &InvertedIndex, stats: &TermStatistics) -> Self {
        let mut local = HashMap::with_capacity(index.len());
        for term in index.vocabulary() {
            let row: Vec<(DocId, f64)> = index
                .postings(term)
                .iter()
                .map(|&doc| (doc, log_tf(stats.term_frequency(doc, term))))
                .collect();
            local.insert(term.clone(), row);
        }
        Self { local }
    }

    pub fn local_weight(&self, term: &str, doc: DocId) -> f64 {
        self.local
            .get(term)
            .and_then(|row| {
                row.binary_search_by_key(&doc, |&(d, _)| d)
                    .ok()
                    .map(|i| row[i].1)
            })
            .unwrap_or(0.0)
    }

    /// Combined tf-idf weight. Out-of-vocabulary terms weigh 0.
    pub fn weight(&self, stats: &TermStatistics, term: &str, doc: DocId) -> f64 {
        match stats.idf(term) {
            Some(idf) => self.local_weight(term, doc) * idf,
            None => 0.0,
        }
    }
}
