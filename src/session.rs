//! Query session
//!
//! Built once per process from the root directory. Every query goes through
//! a [`Session`], which also remembers the per-file hit counts of the last
//! line query for the `last query` info view.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::error::Result;
use crate::core::model::{InfoView, PageSet};
use crate::explore::overview::{self, OverviewPane};
use crate::explore::tree::{self, ExploreOptions, FileTree};
use crate::explore::{deps, Annotator, HitCounts};
use crate::index::store::LabelStore;
use crate::search::basic::basic_search;
use crate::search::fuzzy::fuzzy_search;
use crate::search::related::related_lines;
use crate::search::{SearchFilter, SearchOutcome};

pub struct Session {
    root: PathBuf,
    store: LabelStore,
    tree: FileTree,
    last_hits: HitCounts,
}

impl Session {
    /// Classify the tree under `root` and build the file tree.
    ///
    /// Fails if any file cannot be read.
    pub fn open(root: &Path) -> Result<Self> {
        let root = root.canonicalize()?;
        let store = LabelStore::build(&root)?;
        let tree = FileTree::build(&root)?;
        info!(root = %root.display(), "session ready");

        Ok(Self {
            root,
            store,
            tree,
            last_hits: HitCounts::new(),
        })
    }

    /// Directory the session was built from
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[allow(dead_code)]
    pub fn store(&self) -> &LabelStore {
        &self.store
    }

    #[allow(dead_code)]
    pub fn last_hits(&self) -> &HitCounts {
        &self.last_hits
    }

    /// Regular expression search
    pub fn basic(&mut self, query: &str, filter: &SearchFilter) -> PageSet {
        let outcome = basic_search(&self.store, query, filter);
        self.record_hits(&outcome);
        outcome.into_pages(&self.store)
    }

    /// Approximate search
    pub fn fuzzy(&mut self, query: &str, filter: &SearchFilter) -> PageSet {
        let outcome = fuzzy_search(&self.store, query, filter);
        self.record_hits(&outcome);
        outcome.into_pages(&self.store)
    }

    fn record_hits(&mut self, outcome: &SearchOutcome) {
        self.last_hits.clear();
        for &index in outcome.hits() {
            let path = self.store.lines()[index].file_path.clone();
            *self.last_hits.entry(path).or_default() += 1;
        }
    }

    /// File explorer; an integer query zooms into that entry
    pub fn explore(&self, query: &str, options: &ExploreOptions) -> Result<PageSet> {
        let annotator = Annotator::new(&self.store, &self.last_hits, options.view);
        tree::show(&self.tree, &annotator, options, query)
    }

    /// Dependency explorer
    pub fn dependencies(&self, query: &str, view: InfoView) -> PageSet {
        let annotator = Annotator::new(&self.store, &self.last_hits, view);
        deps::show(&self.store, &annotator, query)
    }

    /// Declarations sharing identifiers with a line
    pub fn related(&self, filename: &str, line_number: usize) -> PageSet {
        related_lines(&self.store, filename, line_number)
    }

    /// Per-file overviews
    pub fn files(&self, query: &str, filter: &SearchFilter, pane: OverviewPane) -> PageSet {
        overview::show(&self.store, query, filter, pane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::paginate::page_body;
    use std::fs;
    use tempfile::tempdir;

    fn sample() -> tempfile::TempDir {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        fs::write(
            temp.path().join("src/main.go"),
            "import \"util\"\nfunc main() {\n    util.Log(\"hi\")\n}",
        )
        .unwrap();
        fs::write(
            temp.path().join("src/util.go"),
            "func Log(msg string) {\n    println(msg)\n}",
        )
        .unwrap();
        temp
    }

    #[test]
    fn test_root_is_canonical() {
        let temp = sample();
        let session = Session::open(temp.path()).unwrap();
        assert_eq!(session.root(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_missing_root_fails() {
        let temp = tempdir().unwrap();
        assert!(Session::open(&temp.path().join("absent")).is_err());
    }

    #[test]
    fn test_basic_records_hits() {
        let temp = sample();
        let mut session = Session::open(temp.path()).unwrap();

        let pages = session.basic("Log", &SearchFilter::default());
        assert_eq!(pages.locations, vec!["main.go, line 3", "util.go, line 1"]);

        let main = session.root().join("src/main.go");
        assert_eq!(session.last_hits().get(&main), Some(&1));

        session.basic("(", &SearchFilter::default());
        assert!(session.last_hits().is_empty());
    }

    #[test]
    fn test_hits_view_in_explorer() {
        let temp = sample();
        let mut session = Session::open(temp.path()).unwrap();
        session.fuzzy("println", &SearchFilter::default());

        let options = ExploreOptions {
            view: InfoView::QueryHits,
            ..ExploreOptions::default()
        };
        let pages = session.explore("", &options).unwrap();
        let body = page_body(&pages.pages[0]);
        let util_line = body.lines().find(|l| l.contains("- util.go")).unwrap();
        assert!(util_line.ends_with("| 1"));
        let main_line = body.lines().find(|l| l.contains("- main.go")).unwrap();
        assert!(main_line.ends_with("| 0"));
    }

    #[test]
    fn test_dependencies_and_files() {
        let temp = sample();
        let session = Session::open(temp.path()).unwrap();

        let pages = session.dependencies("", InfoView::Functions);
        let body = page_body(&pages.pages[0]);
        assert!(body.starts_with("0   |> src/main.go\n"));
        assert!(body.contains("\tsrc/util.go"));

        let files = session.files("util", &SearchFilter::default(), OverviewPane::Primary);
        assert_eq!(files.locations, vec!["src/util.go"]);
        assert_eq!(files.pages, vec!["functions and objects:\n---\n\tLog\n"]);
    }
}
