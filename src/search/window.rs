//! Result window shared by every line-level query

use crate::core::util::crop;
use crate::index::store::LabelStore;

/// Lines of context on each side of a hit
pub const CONTEXT_LINES: usize = 2;

/// Characters kept per context line
pub const CROP_WIDTH: usize = 75;

/// Render the hit at corpus position `index` with its neighbours.
///
/// Neighbours are taken by corpus position, so a window near a file boundary
/// shows lines of the adjacent file. The hit line is marked with `>`.
pub fn format_window(store: &LabelStore, index: usize) -> String {
    format!("\n\n\n{}", window_lines(store, index))
}

/// The window's numbered lines without the leading blank lines
pub fn window_lines(store: &LabelStore, index: usize) -> String {
    let mut window = String::new();
    let start = index.saturating_sub(CONTEXT_LINES);
    let end = (index + CONTEXT_LINES).min(store.len().saturating_sub(1));

    for i in start..=end {
        if i >= store.len() {
            break;
        }
        let marker = if i == index { '>' } else { '|' };
        window.push_str(&format!("{}{}  {}\n", i, marker, crop(store.text(i), CROP_WIDTH)));
    }

    window
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::classify::ClassifiedLine;
    use crate::core::model::{Category, LabeledLine};
    use std::path::Path;

    fn store_of(texts: &[&str]) -> LabelStore {
        let root = Path::new("/project");
        let lines = texts
            .iter()
            .enumerate()
            .map(|(i, text)| ClassifiedLine {
                label: LabeledLine {
                    filename: "a.txt".to_string(),
                    file_path: root.join("a.txt"),
                    file_type: "txt".to_string(),
                    category: Category::Textual,
                    line_number: i + 1,
                    has_comment: false,
                    has_variable_declaration: false,
                    has_object: false,
                    has_function: false,
                    has_domain: false,
                    imported_code: None,
                },
                text: text.to_string(),
            })
            .collect();
        LabelStore::from_lines(root, lines)
    }

    #[test]
    fn test_window_in_the_middle() {
        let store = store_of(&["a", "b", "c", "d", "e", "f"]);
        assert_eq!(format_window(&store, 2), "\n\n\n0|  a\n1|  b\n2>  c\n3|  d\n4|  e\n");
    }

    #[test]
    fn test_window_clipped_at_edges() {
        let store = store_of(&["a", "b", "c"]);
        assert_eq!(format_window(&store, 0), "\n\n\n0>  a\n1|  b\n2|  c\n");
        assert_eq!(format_window(&store, 2), "\n\n\n0|  a\n1|  b\n2>  c\n");
    }

    #[test]
    fn test_window_crops_long_lines() {
        let long = "x".repeat(100);
        let store = store_of(&[long.as_str()]);
        let window = format_window(&store, 0);
        assert_eq!(window, format!("\n\n\n0>  {}\n", "x".repeat(75)));
    }
}
