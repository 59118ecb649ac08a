//! Raw term frequencies per document and document frequencies per term.

use crate::corpus::Corpus;
use crate::index::DocId;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default, Clone)]
pub struct TermStatistics {
    /// doc id → term → occurrences. Ordered so per-document sums are reproducible.
    term_freq: Vec<BTreeMap<String, u32>>,
    /// term → number of documents containing it
    doc_freq: HashMap<String, u32>,
}

impl TermStatistics {
    pub fn compute(corpus: &Corpus) -> Self {
        let mut term_freq = Vec::with_capacity(corpus.len());
        for doc in corpus.documents() {
            let mut counts: BTreeMap<String, u32> = BTreeMap::new();
            for term in &doc.terms {
                *counts.entry(term.clone()).or_insert(0) += 1;
            }
            term_freq.push(counts);
        }

        // the keys of each count map are that document's distinct terms
        let mut doc_freq: HashMap<String, u32> = HashMap::new();
        for counts in &term_freq {
            for term in counts.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }
        Self { term_freq, doc_freq }
    }

    pub fn num_docs(&self) -> usize {
        self.term_freq.len()
    }

    /// Occurrences of `term` in `doc`; 0 when absent or `doc` is out of range.
    pub fn term_frequency(&self, doc: DocId, term: &str) -> u32 {
        self.term_freq
            .get(doc as usize)
            .and_then(|counts| counts.get(term))
            .copied()
            .unwrap_or(0)
    }

    pub fn document_frequency(&self, term: &str) -> u32 {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// `log10(N / df)`, or `None` for a term no document contains.
    pub fn idf(&self, term: &str) -> Option<f64> {
        match self.document_frequency(term) {
            0 => None,
            df => Some((self.num_docs() as f64 / df as f64).log10()),
        }
    }

    /// Distinct terms of `doc` with their counts, in term order.
    pub fn doc_terms(&self, doc: DocId) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.term_freq
            .get(doc as usize)
            .into_iter()
            .flat_map(|counts| counts.iter().map(|(t, &f)| (t.as_str(), f)))
    }

    /// Total token count of `doc`.
    pub fn document_length(&self, doc: DocId) -> u32 {
        self.doc_terms(doc).map(|(_, f)| f).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;

    fn stats() -> TermStatistics {
        TermStatistics::compute(&Corpus::new(vec![
            Document::new("a", ["the", "cat", "sat"]),
            Document::new("b", ["the", "dog", "sat"]),
            Document::new("c", ["the", "cat", "ate", "cat"]),
        ]))
    }

    #[test]
    fn counts_raw_occurrences() {
        let s = stats();
        assert_eq!(s.term_frequency(2, "cat"), 2);
        assert_eq!(s.term_frequency(1, "cat"), 0);
        assert_eq!(s.term_frequency(9, "cat"), 0);
        assert_eq!(s.document_length(2), 4);
    }

    #[test]
    fn document_frequency_counts_distinct_documents() {
        let s = stats();
        assert_eq!(s.document_frequency("the"), 3);
        assert_eq!(s.document_frequency("cat"), 2);
        assert_eq!(s.document_frequency("dog"), 1);
        assert_eq!(s.document_frequency("bird"), 0);
    }

    #[test]
    fn idf_is_zero_for_ubiquitous_terms_and_undefined_for_unknown() {
        let s = stats();
        assert_eq!(s.idf("the"), Some(0.0));
        assert!((s.idf("dog").unwrap() - 3f64.log10()).abs() < 1e-9);
        assert_eq!(s.idf("bird"), None);
    }
}
