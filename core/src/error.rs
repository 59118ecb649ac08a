use thiserror::Error;

/// Errors surfaced by the query API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A boolean query needs at least one term to seed the intersection.
    #[error("query has no terms after normalization")]
    EmptyQuery,
    #[error("unknown query mode `{0}` (expected `boolean` or `ranked`)")]
    UnknownMode(String),
}
