//! Regular expression search

use regex::Regex;
use tracing::debug;

use crate::index::store::LabelStore;
use crate::search::{SearchFilter, SearchOutcome};

/// Every line whose text matches `query`, in corpus order
pub fn basic_search(store: &LabelStore, query: &str, filter: &SearchFilter) -> SearchOutcome {
    let pattern = match Regex::new(query) {
        Ok(p) => p,
        Err(err) => {
            debug!(%query, error = %err, "rejected query");
            return SearchOutcome::Invalid;
        }
    };

    let hits: Vec<usize> = store
        .iter()
        .filter(|(_, label, text)| filter.accepts(label) && pattern.is_match(text))
        .map(|(index, _, _)| index)
        .collect();

    debug!(%query, hits = hits.len(), "basic search");
    SearchOutcome::Hits(hits)
}
