//! Per-file overview
//!
//! Every classified file gets two panes. Code files list their declarations and
//! imports, data files their fields and a preview, everything else a preview.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use crate::core::model::{Category, LabeledLine, PageSet};
use crate::core::util::crop;
use crate::index::store::LabelStore;
use crate::search::SearchFilter;

const PREVIEW_LINES: usize = 15;
const PREVIEW_WIDTH: usize = 60;
const CSV_SEPARATORS: [char; 3] = [',', ';', '\t'];
pub const UNSUPPORTED_FIELDS: &str = "file type not supported in current version of codis.";

/// Which of the two panes of an overview to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverviewPane {
    /// Declarations for code, fields for data
    #[default]
    Primary,
    /// Imports for code, preview for data
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOverview {
    /// Root-relative path
    pub relative: String,
    pub category: Category,
    pub primary: String,
    pub secondary: String,
}

impl FileOverview {
    fn new(relative: String, category: Category, imports: &[String]) -> Self {
        let (primary, secondary) = match category {
            Category::Code => {
                let listed: String = imports.iter().map(|f| format!("\t{}\n", f)).collect();
                (
                    "functions and objects:\n---\n".to_string(),
                    format!("imported files:\n---\n{}", listed),
                )
            }
            Category::Data => ("Fields:\n---\n".to_string(), "Preview:\n---\n".to_string()),
            _ => ("Preview:\n---\n".to_string(), "Preview:\n---\n".to_string()),
        };
        Self {
            relative,
            category,
            primary,
            secondary,
        }
    }

    fn add_line(&mut self, label: &LabeledLine, text: &str) {
        match self.category {
            Category::Code => self.primary.push_str(&declared_name(label, text)),
            Category::Data => {
                let field = field_names(label, text, &self.primary);
                self.primary.push_str(&field);
                self.secondary.push_str(&preview_line(label, text));
            }
            _ => {
                let preview = preview_line(label, text);
                self.primary.push_str(&preview);
                self.secondary.push_str(&preview);
            }
        }
    }

    pub fn pane(&self, pane: OverviewPane) -> &str {
        match pane {
            OverviewPane::Primary => &self.primary,
            OverviewPane::Secondary => &self.secondary,
        }
    }
}

/// `\tname\n` for a function line, `name\n` for an object line, else nothing.
///
/// The name runs from after the first space up to the first `(`; the last
/// character of the line never counts.
fn declared_name(label: &LabeledLine, text: &str) -> String {
    let mut name = if label.has_function {
        String::from("\t")
    } else if label.has_object {
        String::new()
    } else {
        return String::new();
    };

    let mut chars: Vec<char> = text.chars().collect();
    chars.pop();
    let mut started = false;
    for c in chars {
        if c == '(' {
            break;
        }
        if started {
            name.push(c);
        }
        if c == ' ' {
            started = true;
        }
    }
    name.push('\n');
    name
}

/// JSON field names (first occurrence only) or the CSV header columns
fn field_names(label: &LabeledLine, text: &str, current: &str) -> String {
    match label.file_type.as_str() {
        "json" => match text.split_once(':') {
            Some((field, _)) if !current.contains(field) => format!("{}\n", field),
            _ => String::new(),
        },
        "csv" if label.line_number == 1 => {
            let separator = csv_separator(text);
            text.replace(separator, "\n")
        }
        "csv" => String::new(),
        _ if label.line_number == 1 => UNSUPPORTED_FIELDS.to_string(),
        _ => String::new(),
    }
}

/// Most frequent candidate separator; ties go to the earlier candidate
fn csv_separator(line: &str) -> char {
    let mut best = CSV_SEPARATORS[0];
    let mut best_count = 0;
    for separator in CSV_SEPARATORS {
        let count = line.chars().filter(|&c| c == separator).count();
        if count > best_count {
            best = separator;
            best_count = count;
        }
    }
    best
}

fn preview_line(label: &LabeledLine, text: &str) -> String {
    if label.line_number <= PREVIEW_LINES {
        format!("{}\n", crop(text, PREVIEW_WIDTH))
    } else {
        String::new()
    }
}

/// Overviews of every file, in store order
pub fn build_overviews(store: &LabelStore) -> Vec<FileOverview> {
    let mut order: Vec<PathBuf> = Vec::new();
    let mut overviews: HashMap<PathBuf, FileOverview> = HashMap::new();

    for (_, label, text) in store.iter() {
        let overview = overviews.entry(label.file_path.clone()).or_insert_with(|| {
            order.push(label.file_path.clone());
            let relative = store.relative(&label.file_path);
            let imports = store.imports().get(&relative).cloned().unwrap_or_default();
            FileOverview::new(relative, label.category, &imports)
        });
        overview.add_line(label, text);
    }

    order
        .into_iter()
        .filter_map(|path| overviews.remove(&path))
        .collect()
}

/// One page per file whose relative path contains `query`
pub fn show(
    store: &LabelStore,
    query: &str,
    filter: &SearchFilter,
    pane: OverviewPane,
) -> PageSet {
    let mut pages = PageSet::new();
    for overview in build_overviews(store) {
        let accepted =
            filter.categories.is_empty() || filter.categories.contains(&overview.category);
        if accepted && overview.relative.contains(query) {
            pages.push(overview.pane(pane), overview.relative.as_str());
        }
    }
    debug!(%query, files = pages.len(), "file overview");
    pages.or_none()
}
