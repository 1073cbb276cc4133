//! Related-line lookup
//!
//! Finds declaration lines that mention identifiers of a selected line.

use std::collections::HashSet;

use tracing::debug;

use crate::core::model::PageSet;
use crate::core::util::{has_non_symbol, split_any};
use crate::index::store::LabelStore;
use crate::search::window::window_lines;

pub const LINE_NOT_FOUND: &str = "line not found...";
pub const NO_RELATED_LINES: &str = "No dependencies found";

const TOKEN_SEPARATORS: &str = " .:=(){}[]";
const IGNORED_TOKENS: &[&str] = &["var", "let", "include", "import", "func", "def", "fun"];

/// Position of the line with this file name and 1-based number
pub fn find_line(store: &LabelStore, filename: &str, line_number: usize) -> Option<usize> {
    store
        .lines()
        .iter()
        .position(|l| l.filename == filename && l.line_number == line_number)
}

/// Identifier-like tokens of a line worth searching for
pub fn tokens(line: &str) -> Vec<&str> {
    split_any(line, TOKEN_SEPARATORS)
        .into_iter()
        .filter(|t| t.chars().count() > 2 && !IGNORED_TOKENS.contains(t) && has_non_symbol(t))
        .collect()
}

/// Declaration lines containing any token of the selected line
pub fn related_lines(store: &LabelStore, filename: &str, line_number: usize) -> PageSet {
    let Some(selected) = find_line(store, filename, line_number) else {
        return PageSet::message(LINE_NOT_FOUND);
    };
    let selected_text = store.text(selected);

    let mut seen = HashSet::new();
    let mut pages = PageSet::new();
    for token in tokens(selected_text) {
        for (index, label, text) in store.iter() {
            if label.is_declaration() && text.contains(token) && seen.insert(index) {
                let window = window_lines(store, index);
                let page = format!("\n\n\n{}\n\n---\n\n{}", selected_text, window);
                pages.push(page, label.location());
            }
        }
    }

    debug!(%filename, line_number, hits = pages.len(), "related lines");
    if pages.len() <= 1 {
        return PageSet::message(NO_RELATED_LINES);
    }
    pages
}
