//! Label store
//!
//! Holds the classified corpus in walk order plus the per-file aggregates the
//! explorers annotate with. Built once; read-only afterwards.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::error::Result;
use crate::core::model::{Category, LabeledLine};
use crate::core::paths::make_relative;
use crate::index::classify::{classify, ClassifiedLine};

/// Import lists keyed by root-relative file path
pub type ImportMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default)]
pub struct LabelStore {
    root: PathBuf,
    lines: Vec<LabeledLine>,
    texts: Vec<String>,
    /// Last write wins when two lines share an identical label
    lookup: HashMap<LabeledLine, usize>,
    files: Vec<PathBuf>,
    categories: HashMap<PathBuf, Category>,
    function_counts: HashMap<PathBuf, usize>,
    object_counts: HashMap<PathBuf, usize>,
    domain_counts: HashMap<PathBuf, usize>,
    imports: ImportMap,
}

impl LabelStore {
    /// Classify `root` and derive the aggregates
    pub fn build(root: &Path) -> Result<Self> {
        let lines = classify(root)?;
        let store = Self::from_lines(root, lines);
        info!(
            files = store.files.len(),
            lines = store.lines.len(),
            "label store built"
        );
        Ok(store)
    }

    pub fn from_lines(root: &Path, classified: Vec<ClassifiedLine>) -> Self {
        let mut store = Self {
            root: root.to_path_buf(),
            ..Self::default()
        };

        for (index, ClassifiedLine { label, text }) in classified.into_iter().enumerate() {
            store.aggregate(&label);
            store.lookup.insert(label.clone(), index);
            store.lines.push(label);
            store.texts.push(text);
        }

        store
    }

    fn aggregate(&mut self, label: &LabeledLine) {
        let path = &label.file_path;
        if !self.categories.contains_key(path) {
            self.categories.insert(path.clone(), label.category);
            self.files.push(path.clone());
        }
        if label.has_function {
            *self.function_counts.entry(path.clone()).or_default() += 1;
        }
        if label.has_object {
            *self.object_counts.entry(path.clone()).or_default() += 1;
        }
        if label.has_domain {
            *self.domain_counts.entry(path.clone()).or_default() += 1;
        }

        if let Some(imported) = &label.imported_code {
            let Some(source) = make_relative(path, &self.root) else {
                return;
            };
            if *imported == source {
                return;
            }
            let list = self.imports.entry(source).or_default();
            if !list.contains(imported) {
                list.push(imported.clone());
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All labels in corpus order
    pub fn lines(&self) -> &[LabeledLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of the line at a corpus position
    pub fn text(&self, index: usize) -> &str {
        self.texts.get(index).map(String::as_str).unwrap_or("")
    }

    /// Text lookup by label
    #[allow(dead_code)]
    pub fn text_of(&self, label: &LabeledLine) -> Option<&str> {
        self.lookup.get(label).map(|&index| self.text(index))
    }

    /// Labels paired with their text, in corpus order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LabeledLine, &str)> {
        self.lines
            .iter()
            .zip(self.texts.iter())
            .enumerate()
            .map(|(index, (label, text))| (index, label, text.as_str()))
    }

    /// Absolute paths of the classified files, in walk order
    #[allow(dead_code)]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn category(&self, path: &Path) -> Option<Category> {
        self.categories.get(path).copied()
    }

    pub fn function_count(&self, path: &Path) -> usize {
        self.function_counts.get(path).copied().unwrap_or(0)
    }

    pub fn object_count(&self, path: &Path) -> usize {
        self.object_counts.get(path).copied().unwrap_or(0)
    }

    pub fn domain_count(&self, path: &Path) -> usize {
        self.domain_counts.get(path).copied().unwrap_or(0)
    }

    /// Files with at least one non-self import reference
    pub fn imports(&self) -> &ImportMap {
        &self.imports
    }

    /// Root-relative form of an absolute path
    pub fn relative(&self, path: &Path) -> String {
        make_relative(path, &self.root).unwrap_or_else(|| path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_counts_and_categories() {
        let temp = tempdir().unwrap();
        write(
            temp.path(),
            "app.py",
            "class App:\n    def run(self):\n        pass\n    def stop(self):\n        return 'https://x.io'",
        );
        write(temp.path(), "data.json", "{\"a\": 1}");

        let store = LabelStore::build(temp.path()).unwrap();
        let app = temp.path().join("app.py");
        let data = temp.path().join("data.json");

        assert_eq!(store.category(&app), Some(Category::Code));
        assert_eq!(store.category(&data), Some(Category::Data));
        assert_eq!(store.function_count(&app), 2);
        assert_eq!(store.object_count(&app), 1);
        assert_eq!(store.domain_count(&app), 1);
        assert_eq!(store.function_count(&data), 0);
        assert_eq!(store.files(), &[app, data]);
    }

    #[test]
    fn test_imports_deduplicated_without_self() {
        let temp = tempdir().unwrap();
        write(temp.path(), "main.go", "package main\nimport \"util\"\nimport \"util\"\nfunc main() {}");
        write(temp.path(), "util.go", "package util");

        let store = LabelStore::build(temp.path()).unwrap();
        let imports = store.imports();
        assert_eq!(imports.get("main.go"), Some(&vec!["util.go".to_string()]));
        // util.go only references itself
        assert!(!imports.contains_key("util.go"));
    }

    #[test]
    fn test_text_lookup() {
        let temp = tempdir().unwrap();
        write(temp.path(), "notes.txt", "alpha\nbeta");

        let store = LabelStore::build(temp.path()).unwrap();
        assert_eq!(store.len(), 2);
        let second = &store.lines()[1];
        assert_eq!(store.text_of(second), Some("beta"));
        assert_eq!(store.text(1), "beta");
        assert_eq!(store.text(99), "");
    }

    #[test]
    fn test_identical_labels_share_a_lookup_slot() {
        let root = Path::new("/project");
        let label = LabeledLine {
            filename: "a.txt".to_string(),
            file_path: root.join("a.txt"),
            file_type: "txt".to_string(),
            category: Category::Textual,
            line_number: 1,
            has_comment: false,
            has_variable_declaration: false,
            has_object: false,
            has_function: false,
            has_domain: false,
            imported_code: None,
        };
        let lines = vec![
            ClassifiedLine {
                label: label.clone(),
                text: "first".to_string(),
            },
            ClassifiedLine {
                label: label.clone(),
                text: "second".to_string(),
            },
        ];

        let store = LabelStore::from_lines(root, lines);
        assert_eq!(store.len(), 2);
        assert_eq!(store.text(0), "first");
        assert_eq!(store.text_of(&label), Some("second"));
    }
}
