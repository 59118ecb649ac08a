//! Cosine-similarity ranking.
//!
//! Query weights are `1 + log10(qtf)` without IDF; document weights are the
//! combined tf-idf weights. Scores are divided by the document vector norm
//! only, the query vector is left unnormalized.

use crate::index::{DocId, InvertedIndex};
use crate::query::term_frequencies;
use crate::stats::TermStatistics;
use crate::weights::{log_tf, TfIdfTable};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub score: f64,
}

/// Borrowed view over the read-only tables. Each call allocates its own
/// accumulator, so one scorer can serve concurrent queries.
#[derive(Clone, Copy)]
pub struct Scorer<'a> {
    index: &'a InvertedIndex,
    stats: &'a TermStatistics,
    weights: &'a TfIdfTable,
}

impl<'a> Scorer<'a> {
    pub fn new(index: &'a InvertedIndex, stats: &'a TermStatistics, weights: &'a TfIdfTable) -> Self {
        Self { index, stats, weights }
    }

    /// Euclidean norm of the combined weights over the terms present in `doc`.
    pub fn document_norm(&self, doc: DocId) -> f64 {
        self.stats
            .doc_terms(doc)
            .map(|(term, _)| {
                let w = self.weights.weight(self.stats, term, doc);
                w * w
            })
            .sum::<f64>()
            .sqrt()
    }

    pub fn document_norms(&self) -> Vec<f64> {
        (0..self.stats.num_docs() as DocId).map(|d| self.document_norm(d)).collect()
    }

    /// One score per document, in id order. Documents with a zero norm score 0.
    pub fn scores<S: AsRef<str>>(&self, terms: &[S]) -> Vec<f64> {
        let mut scores = vec![0.0f64; self.stats.num_docs()];
        for (term, qtf) in term_frequencies(terms) {
            if !self.index.contains(term) {
                continue;
            }
            let query_weight = log_tf(qtf);
            for &doc in self.index.postings(term) {
                scores[doc as usize] += query_weight * self.weights.weight(self.stats, term, doc);
            }
        }

        for (score, norm) in scores.iter_mut().zip(self.document_norms()) {
            *score = if norm == 0.0 { 0.0 } else { *score / norm };
        }
        scores
    }

    /// Documents with a positive score, best first; equal scores by ascending id.
    pub fn rank<S: AsRef<str>>(&self, terms: &[S]) -> Vec<ScoredDoc> {
        let mut ranked: Vec<ScoredDoc> = self
            .scores(terms)
            .into_iter()
            .enumerate()
            .filter(|&(_, score)| score > 0.0)
            .map(|(doc, score)| ScoredDoc { doc_id: doc as DocId, score })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.doc_id.cmp(&b.doc_id)));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Corpus, Document};

    const EPS: f64 = 1e-4;

    struct Fixture {
        index: InvertedIndex,
        stats: TermStatistics,
        weights: TfIdfTable,
    }

    impl Fixture {
        fn new(docs: Vec<Document>) -> Self {
            let corpus = Corpus::new(docs);
            let index = InvertedIndex::build(&corpus);
            let stats = TermStatistics::compute(&corpus);
            let weights = TfIdfTable::build(&index, &stats);
            Self { index, stats, weights }
        }

        fn scorer(&self) -> Scorer<'_> {
            Scorer::new(&self.index, &self.stats, &self.weights)
        }
    }

    fn cats() -> Fixture {
        Fixture::new(vec![
            Document::new("a", ["the", "cat", "sat"]),
            Document::new("b", ["the", "dog", "sat"]),
            Document::new("c", ["the", "cat", "ate"]),
        ])
    }

    #[test]
    fn matching_documents_rank_above_non_matching() {
        let f = cats();
        let scores = f.scorer().scores(&["cat"]);
        assert_eq!(scores[1], 0.0);
        assert!(scores[0] > 0.0 && scores[2] > 0.0);

        let ranked = f.scorer().rank(&["cat"]);
        let ids: Vec<DocId> = ranked.iter().map(|r| r.doc_id).collect();
        assert!(!ids.contains(&1));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn score_matches_hand_computation() {
        let f = cats();
        let idf_cat = (3.0f64 / 2.0).log10();
        let idf_sat = (3.0f64 / 2.0).log10();
        // "the" has idf 0 and drops out of the norm
        let norm0 = (idf_cat * idf_cat + idf_sat * idf_sat).sqrt();
        let expected = idf_cat / norm0;
        let scores = f.scorer().scores(&["cat"]);
        assert!((scores[0] - expected).abs() < EPS);
        assert!((f.scorer().document_norm(0) - norm0).abs() < EPS);
    }

    #[test]
    fn repeated_query_terms_are_log_damped() {
        let f = cats();
        let once = f.scorer().scores(&["dog"])[1];
        let ten = f.scorer().scores(&vec!["dog"; 10])[1];
        assert!((ten - 2.0 * once).abs() < EPS);
    }

    #[test]
    fn zero_norm_documents_score_zero_not_nan() {
        let f = Fixture::new(vec![
            Document::new("a", ["cat"]),
            Document::new("b", Vec::<String>::new()),
        ]);
        let scores = f.scorer().scores(&["cat"]);
        assert_eq!(f.scorer().document_norm(1), 0.0);
        assert_eq!(scores[1], 0.0);

        // every term ubiquitous: numerator and norm are both 0
        let f = Fixture::new(vec![
            Document::new("a", ["the"]),
            Document::new("b", ["the", "the"]),
        ]);
        let scores = f.scorer().scores(&["the"]);
        assert!(scores.iter().all(|s| *s == 0.0));
        assert!(f.scorer().rank(&["the"]).is_empty());
    }

    #[test]
    fn ties_break_by_ascending_id() {
        let f = Fixture::new(vec![
            Document::new("a", ["cat", "hat"]),
            Document::new("b", ["dog"]),
            Document::new("c", ["cat", "hat"]),
        ]);
        let ranked = f.scorer().rank(&["cat"]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!((ranked[0].doc_id, ranked[1].doc_id), (0, 2));
    }

    #[test]
    fn unknown_and_empty_queries_rank_nothing() {
        let f = cats();
        assert!(f.scorer().rank(&["bird"]).is_empty());
        let none: [&str; 0] = [];
        assert!(f.scorer().rank(&none).is_empty());
    }
}
