//! Approximate line search
//!
//! The score counts query characters found in order and (nearly) adjacent in
//! the line, allowing one skipped query character at a time. Comparison is
//! case-insensitive. It is not an edit distance.

use tracing::debug;

use crate::index::store::LabelStore;
use crate::search::{SearchFilter, SearchOutcome};

/// Score `line` against `query`.
///
/// Scanning only credits characters while `query_index < len(query) - 1`, so
/// the last query character is never matched directly: a two-character query
/// scores at most 1. This mirrors the established ranking and is kept as is.
pub fn compute_fuzzy_score(line: &str, query: &str) -> usize {
    let query: Vec<char> = query.to_lowercase().chars().collect();
    if query.is_empty() {
        return 0;
    }

    let mut score = 0usize;
    let mut query_index = 0usize;
    let mut prev_index = 0usize;

    for (i, c) in line.to_lowercase().chars().enumerate() {
        if query_index + 1 >= query.len() {
            break;
        }
        let distance = prev_index.abs_diff(i);

        if c == query[query_index] && distance <= 1 {
            score += 1;
            query_index += 1;
            prev_index = i;
        } else if query_index + 2 < query.len() && c == query[query_index + 1] {
            score += 1;
            query_index += 2;
            prev_index = i;
        } else if distance >= 2 && c == query[0] {
            // restart drops the earlier run
            query_index = 1;
            score = 1;
            prev_index = i;
        }
    }

    score
}

/// Hit threshold: the score must exceed half the query length
pub fn threshold(query: &str) -> usize {
    query.chars().count() / 2
}

pub fn is_fuzzy_hit(line: &str, query: &str) -> bool {
    compute_fuzzy_score(line, query) > threshold(query)
}

/// Every line that is a fuzzy hit, in corpus order (no ranking)
pub fn fuzzy_search(store: &LabelStore, query: &str, filter: &SearchFilter) -> SearchOutcome {
    let hits: Vec<usize> = store
        .iter()
        .filter(|(_, label, text)| filter.accepts(label) && is_fuzzy_hit(text, query))
        .map(|(index, _, _)| index)
        .collect();

    debug!(%query, hits = hits.len(), "fuzzy search");
    SearchOutcome::Hits(hits)
}
