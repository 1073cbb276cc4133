//! Explorers - hierarchical views over the source tree
//!
//! Provides:
//! - deps: heuristic file-to-file import tree
//! - tree: filesystem tree with zoom
//! - overview: per-file summary of declarations, fields or a preview
//!
//! The tree-shaped explorers annotate every line through an [`Annotator`].

pub mod deps;
pub mod overview;
pub mod tree;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::model::InfoView;
use crate::core::util::format_info_box;
use crate::index::store::LabelStore;

/// Per-file hit counts of the last line query, keyed by absolute path
pub type HitCounts = HashMap<PathBuf, usize>;

/// Selects and formats the info suffix of explorer lines
#[derive(Debug, Clone, Copy)]
pub struct Annotator<'a> {
    store: &'a LabelStore,
    hits: &'a HitCounts,
    view: InfoView,
}

impl<'a> Annotator<'a> {
    pub fn new(store: &'a LabelStore, hits: &'a HitCounts, view: InfoView) -> Self {
        Self { store, hits, view }
    }

    pub fn view(&self) -> InfoView {
        self.view
    }

    pub fn store(&self) -> &'a LabelStore {
        self.store
    }

    /// Info value of a file under the active view
    pub fn info(&self, path: &Path) -> String {
        match self.view {
            InfoView::Category => self
                .store
                .category(path)
                .map(|c| c.to_string())
                .unwrap_or_default(),
            InfoView::Functions => self.store.function_count(path).to_string(),
            InfoView::Objects => self.store.object_count(path).to_string(),
            InfoView::Domains => self.store.domain_count(path).to_string(),
            InfoView::QueryHits => self.hits.get(path).copied().unwrap_or(0).to_string(),
        }
    }

    /// Right-aligned info suffix for `line`
    pub fn annotate(&self, line: &str, path: &Path) -> String {
        format_info_box(line, &self.info(path))
    }

    /// Suffix with an empty info value
    pub fn blank(&self, line: &str) -> String {
        format_info_box(line, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_info_per_view() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.go"), "func A() {}\nfunc B() {}\n// https://x.com").unwrap();
        let store = LabelStore::build(temp.path()).unwrap();
        let path = temp.path().join("a.go");

        let mut hits = HitCounts::new();
        hits.insert(path.clone(), 7);

        let info = |view| Annotator::new(&store, &hits, view).info(&path);
        assert_eq!(info(InfoView::Category), "code");
        assert_eq!(info(InfoView::Functions), "2");
        assert_eq!(info(InfoView::Objects), "0");
        assert_eq!(info(InfoView::Domains), "1");
        assert_eq!(info(InfoView::QueryHits), "7");
    }

    #[test]
    fn test_unknown_path_has_empty_category() {
        let store = LabelStore::default();
        let hits = HitCounts::new();
        let annotator = Annotator::new(&store, &hits, InfoView::Category);
        assert_eq!(annotator.info(Path::new("/nowhere/x.go")), "");
        assert_eq!(annotator.annotate("", Path::new("/nowhere/x.go")), format!("{}| \n", " ".repeat(60)));
    }
}
