use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Recorded in the stemmed cache manifest so a cache built by another stemmer is detectable.
pub const STEMMER_NAME: &str = "snowball-english";

/// NFKC-normalize and lowercase a raw token, then drop everything outside `[a-z0-9]`.
/// Returns `None` when nothing survives.
pub fn normalize_token(raw: &str) -> Option<String> {
    let lowered = raw.nfkc().collect::<String>().to_lowercase();
    let cleaned = NON_ALNUM.replace_all(&lowered, "");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.into_owned())
    }
}

/// Reduce a normalized token to its stem.
pub fn stem(term: &str) -> String {
    STEMMER.stem(term).into_owned()
}

/// Tokenize text into stemmed terms: whitespace split, normalization, stemming.
/// Corpus loading and query parsing both go through here.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(normalize_token)
        .map(|t| stem(&t))
        .collect()
}
