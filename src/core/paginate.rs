//! Splits rendered explorer output into fixed-size pages

use crate::core::model::{InfoView, PageSet};
use crate::core::util::format_info_box;

/// Content lines per page
pub const PAGE_LINES: usize = 15;

pub const FILE_EXPLORER: &str = "file explorer";
pub const DEPENDENCY_EXPLORER: &str = "dependency explorer";

/// Pages a newline-delimited block under a constant location label
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    location: &'static str,
    page_lines: usize,
}

impl Paginator {
    pub fn new(location: &'static str) -> Self {
        Self {
            location,
            page_lines: PAGE_LINES,
        }
    }

    #[allow(dead_code)]
    pub fn with_page_lines(mut self, page_lines: usize) -> Self {
        self.page_lines = page_lines.max(1);
        self
    }

    /// One-line header naming the active info view
    pub fn header(view: InfoView) -> String {
        format_info_box("", &format!("showing: {}", view.label()))
    }

    /// Split `rendered` into pages, each prefixed with the header.
    ///
    /// Line terminators are kept, so the concatenated page bodies equal the
    /// input. An empty block still yields one header-only page.
    pub fn paginate(&self, rendered: &str, view: InfoView) -> PageSet {
        let header = Self::header(view);
        let lines: Vec<&str> = rendered.split_inclusive('\n').collect();

        let mut pages = PageSet::new();
        if lines.is_empty() {
            pages.push(header, self.location);
            return pages;
        }
        for chunk in lines.chunks(self.page_lines) {
            let mut page = header.clone();
            page.extend(chunk.iter().copied());
            pages.push(page, self.location);
        }
        pages
    }
}

/// Page body without its header line
#[cfg(test)]
pub fn page_body(page: &str) -> &str {
    page.split_once('\n').map(|(_, body)| body).unwrap_or("")
}
