//! Free-text queries. This is the only way raw text reaches retrieval; both
//! retrieval algorithms take the already-stemmed terms.

use crate::error::SearchError;
use crate::tokenizer::tokenize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    terms: Vec<String>,
}

impl Query {
    /// Lowercase, split on whitespace, strip non-alphanumerics, drop empties, stem.
    pub fn parse(raw: &str) -> Self {
        Self { raw: raw.to_string(), terms: tokenize(raw) }
    }

    pub fn raw(&self) -> &str { &self.raw }

    /// Stemmed terms in query order, repeats kept.
    pub fn terms(&self) -> &[String] { &self.terms }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
}

/// Occurrences of each distinct term within the query itself.
pub fn term_frequencies<S: AsRef<str>>(terms: &[S]) -> BTreeMap<&str, u32> {
    let mut tf = BTreeMap::new();
    for term in terms {
        *tf.entry(term.as_ref()).or_insert(0) += 1;
    }
    tf
}

/// Which retrieval algorithm a query is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    Boolean,
    #[default]
    Ranked,
}

impl FromStr for QueryMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "boolean" | "and" => Ok(QueryMode::Boolean),
            "ranked" | "cosine" => Ok(QueryMode::Ranked),
            other => Err(SearchError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryMode::Boolean => f.write_str("boolean"),
            QueryMode::Ranked => f.write_str("ranked"),
        }
    }
}
