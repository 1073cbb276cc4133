//! Line-level queries over the label store
//!
//! Provides:
//! - basic: regular expression search
//! - fuzzy: near-contiguous subsequence search
//! - related: lines sharing identifiers with a selected line
//! - window: the context window every hit is rendered with

pub mod basic;
pub mod fuzzy;
pub mod related;
pub mod window;

use crate::core::model::{Category, LabeledLine, PageSet};
use crate::index::store::LabelStore;
use crate::search::window::format_window;

/// Restricts which lines a search may hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    /// Empty means every category
    pub categories: Vec<Category>,
    pub include_comments: bool,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            include_comments: true,
        }
    }
}

impl SearchFilter {
    pub fn accepts(&self, label: &LabeledLine) -> bool {
        (self.categories.is_empty() || self.categories.contains(&label.category))
            && (self.include_comments || !label.has_comment)
    }
}

/// Corpus positions hit by a search, or a rejected query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Invalid,
    Hits(Vec<usize>),
}

impl SearchOutcome {
    pub fn hits(&self) -> &[usize] {
        match self {
            SearchOutcome::Invalid => &[],
            SearchOutcome::Hits(hits) => hits,
        }
    }

    /// One window page per hit, in corpus order
    pub fn into_pages(self, store: &LabelStore) -> PageSet {
        match self {
            SearchOutcome::Invalid => PageSet::invalid_query(),
            SearchOutcome::Hits(hits) => render_hits(store, &hits),
        }
    }
}

pub fn render_hits(store: &LabelStore, hits: &[usize]) -> PageSet {
    let mut pages = PageSet::new();
    for &index in hits {
        pages.push(format_window(store, index), store.lines()[index].location());
    }
    pages.or_none()
}
