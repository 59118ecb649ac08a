use proptest::prelude::*;
use std::collections::BTreeSet;
use vsm_core::boolean::boolean_retrieve;
use vsm_core::{Corpus, DocId, Document, InvertedIndex, IrSystem, TermStatistics};

const EPS: f64 = 1e-4;

fn example() -> IrSystem {
    IrSystem::build(Corpus::new(vec![
        Document::new("0", ["the", "cat", "sat"]),
        Document::new("1", ["the", "dog", "sat"]),
        Document::new("2", ["the", "cat", "ate"]),
    ]))
}

#[test]
fn example_corpus_statistics() {
    let sys = example();
    let vocab: BTreeSet<&str> = sys.vocabulary().iter().map(String::as_str).collect();
    assert_eq!(vocab, ["the", "cat", "sat", "dog", "ate"].into_iter().collect());
    assert_eq!(sys.posting("cat"), &[0, 2]);
    assert_eq!(sys.document_frequency("the"), 3);
    assert_eq!(sys.document_frequency("dog"), 1);
}

#[test]
fn example_queries() {
    let sys = example();
    assert_eq!(sys.boolean_search("cat").unwrap(), vec![0, 2]);
    assert!(sys.boolean_search("cat dog").unwrap().is_empty());

    let scores = sys.scorer().scores(&["cat"]);
    assert!(scores[0] > scores[1] && scores[2] > scores[1]);
    assert_eq!(scores[1], 0.0);
    // cat and sat share idf log10(3/2), "the" contributes nothing
    assert!((scores[0] - std::f64::consts::FRAC_1_SQRT_2).abs() < EPS);
}

fn corpus_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    let term = prop::sample::select(vec!["a", "b", "c", "d", "e", "f"]).prop_map(str::to_owned);
    prop::collection::vec(prop::collection::vec(term, 0..8), 0..8)
}

fn corpus_of(docs: &[Vec<String>]) -> Corpus {
    Corpus::new(
        docs.iter()
            .enumerate()
            .map(|(i, terms)| Document::new(format!("{i:03}"), terms.clone()))
            .collect(),
    )
}

proptest! {
    #[test]
    fn postings_round_trip_token_sets(docs in corpus_strategy()) {
        let index = InvertedIndex::build(&corpus_of(&docs));
        for term in index.vocabulary() {
            let expected: Vec<DocId> = docs
                .iter()
                .enumerate()
                .filter(|(_, d)| d.contains(term))
                .map(|(i, _)| i as DocId)
                .collect();
            prop_assert_eq!(index.postings(term), expected.as_slice());
        }
    }

    #[test]
    fn document_frequency_is_posting_length(docs in corpus_strategy()) {
        let corpus = corpus_of(&docs);
        let index = InvertedIndex::build(&corpus);
        let stats = TermStatistics::compute(&corpus);
        for term in index.vocabulary() {
            prop_assert_eq!(stats.document_frequency(term) as usize, index.postings(term).len());
        }
    }

    #[test]
    fn boolean_and_ignores_term_order(
        docs in corpus_strategy(),
        query in prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "z"]), 1..4),
    ) {
        let index = InvertedIndex::build(&corpus_of(&docs));
        let forward = boolean_retrieve(&index, &query).unwrap();
        let mut reversed = query.clone();
        reversed.reverse();
        prop_assert_eq!(&forward, &boolean_retrieve(&index, &reversed).unwrap());
        prop_assert!(forward.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn weights_are_positive_exactly_where_terms_occur(docs in corpus_strategy()) {
        let sys = IrSystem::build(corpus_of(&docs));
        for term in sys.vocabulary() {
            let df = sys.document_frequency(term) as usize;
            for doc in 0..sys.num_docs() as DocId {
                let w = sys.tfidf(term, doc);
                if sys.term_frequency(doc, term) == 0 {
                    prop_assert_eq!(w, 0.0);
                } else if df < sys.num_docs() {
                    prop_assert!(w > 0.0);
                }
            }
        }
    }

    #[test]
    fn ranked_scores_are_finite_and_sorted(
        docs in corpus_strategy(),
        query in prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "z"]), 0..5),
    ) {
        let sys = IrSystem::build(corpus_of(&docs));
        let scores = sys.scorer().scores(&query);
        prop_assert!(scores.iter().all(|s| s.is_finite() && *s >= 0.0));
        let ranked = sys.scorer().rank(&query);
        prop_assert!(ranked.iter().all(|r| r.score > 0.0));
        prop_assert!(ranked.windows(2).all(|w| w[0].score > w[1].score
            || (w[0].score == w[1].score && w[0].doc_id < w[1].doc_id)));
    }
}
