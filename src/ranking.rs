// src/ranking.rs

//! Relevance ordering for search results.
//!
//! Names and the query are compared through a normalized key: lower-cased,
//! with everything except ASCII letters and digits removed. Results fall
//! into three tiers (exact key match, key starts with the query, the rest)
//! and a stable sort keeps document order inside each tier.

use scraper::Html;

use crate::extract::ListExtractor;
use crate::models::SearchResult;

/// Relevance tier of a candidate, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    Exact,
    Prefix,
    Other,
}

/// Lower-case and keep only ASCII letters and digits.
///
/// # Examples
/// ```
/// use catalog::ranking::normalize_key;
///
/// assert_eq!(normalize_key("iPhone 15 Pro"), "iphone15pro");
/// ```
pub fn normalize_key(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Tier of a normalized candidate key against a normalized query key.
pub fn match_tier(key: &str, query_key: &str) -> MatchTier {
    if key == query_key {
        MatchTier::Exact
    } else if key.starts_with(query_key) {
        MatchTier::Prefix
    } else {
        MatchTier::Other
    }
}

/// Order candidates by relevance to `query`, preserving input order on ties.
pub fn rank_by_query(mut results: Vec<SearchResult>, query: &str) -> Vec<SearchResult> {
    let query_key = normalize_key(query);
    // sort_by_cached_key is stable.
    results.sort_by_cached_key(|result| match_tier(&normalize_key(&result.name), &query_key));
    results
}

/// Extract search candidates from a results page and rank them.
pub fn rank_search_results(
    extractor: &ListExtractor,
    document: &Html,
    query: &str,
) -> Vec<SearchResult> {
    rank_by_query(extractor.extract_search(document), query)
}
