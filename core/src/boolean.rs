use crate::error::SearchError;
use crate::index::{DocId, InvertedIndex};

/// Documents containing every query term (AND), ascending.
///
/// Terms outside the vocabulary have an empty posting list, so they empty the
/// result. An empty term list is rejected instead of matching everything.
pub fn boolean_retrieve<S: AsRef<str>>(index: &InvertedIndex, terms: &[S]) -> Result<Vec<DocId>, SearchError> {
    let (first, rest) = terms.split_first().ok_or(SearchError::EmptyQuery)?;
    let mut result = index.postings(first.as_ref()).to_vec();
    for term in rest {
        if result.is_empty() {
            break;
        }
        result = intersect(&result, index.postings(term.as_ref()));
    }
    Ok(result)
}

/// Merge-intersect two ascending, duplicate-free lists.
pub fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}
