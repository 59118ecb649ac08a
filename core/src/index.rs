use crate::corpus::Corpus;
use std::collections::{BTreeSet, HashMap, HashSet};

pub type DocId = u32;

/// Vocabulary plus, for every term, the ascending list of documents containing it.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    vocabulary: Vec<String>,
    postings: HashMap<String, Vec<DocId>>,
}

impl InvertedIndex {
    /// Each term's posting list comes from a scan of the per-document term sets in
    /// id order, so lists are already sorted and duplicate-free.
    pub fn build(corpus: &Corpus) -> Self {
        let doc_sets: Vec<HashSet<&str>> = corpus
            .documents()
            .iter()
            .map(|d| d.terms.iter().map(String::as_str).collect())
            .collect();
        let vocabulary = build_vocabulary(corpus);

        let mut postings = HashMap::with_capacity(vocabulary.len());
        for term in &vocabulary {
            let list: Vec<DocId> = doc_sets
                .iter()
                .enumerate()
                .filter(|(_, set)| set.contains(term.as_str()))
                .map(|(id, _)| id as DocId)
                .collect();
            postings.insert(term.clone(), list);
        }
        Self { vocabulary, postings }
    }

    /// Posting list for `term`; empty for terms outside the vocabulary.
    pub fn postings(&self, term: &str) -> &[DocId] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sorted, distinct terms.
    pub fn vocabulary(&self) -> &[String] { &self.vocabulary }

    pub fn contains(&self, term: &str) -> bool { self.postings.contains_key(term) }

    pub fn len(&self) -> usize { self.vocabulary.len() }

    pub fn is_empty(&self) -> bool { self.vocabulary.is_empty() }
}

/// Distinct terms across the corpus, in lexicographic order.
pub fn build_vocabulary(corpus: &Corpus) -> Vec<String> {
    let set: BTreeSet<&str> = corpus
        .documents()
        .iter()
        .flat_map(|d| d.terms.iter().map(String::as_str))
        .collect();
    set.into_iter().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;

    fn corpus() -> Corpus {
        Corpus::new(vec![
            Document::new("a", ["the", "cat", "sat"]),
            Document::new("b", ["the", "dog", "sat"]),
            Document::new("c", ["the", "cat", "ate", "cat"]),
        ])
    }

    #[test]
    fn vocabulary_is_distinct_and_sorted() {
        let idx = InvertedIndex::build(&corpus());
        assert_eq!(idx.vocabulary(), &["ate", "cat", "dog", "sat", "the"]);
    }

    #[test]
    fn postings_are_ascending_without_duplicates() {
        let idx = InvertedIndex::build(&corpus());
        assert_eq!(idx.postings("cat"), &[0, 2]);
        assert_eq!(idx.postings("the"), &[0, 1, 2]);
        assert_eq!(idx.postings("dog"), &[1]);
    }

    #[test]
    fn unknown_term_has_empty_postings() {
        let idx = InvertedIndex::build(&corpus());
        assert!(idx.postings("bird").is_empty());
        assert!(!idx.contains("bird"));
    }

    #[test]
    fn empty_corpus_builds_empty_index() {
        let idx = InvertedIndex::build(&Corpus::default());
        assert!(idx.is_empty());
        assert!(idx.postings("cat").is_empty());
    }
}
