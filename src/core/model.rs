//! Core data model
//!
//! Every query maps its output to a [`PageSet`] before rendering. The corpus
//! itself is an ordered sequence of [`LabeledLine`]s.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Location label (and page text) used when a query has nothing to show
pub const NONE: &str = "None";

/// Page text returned for a malformed regular expression
pub const INVALID_QUERY: &str = "invalid query";

/// Coarse file classification derived from the extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Data,
    Web,
    Code,
    Compiled,
    Textual,
    Undefined,
}

impl Category {
    /// Look up the category of a file extension (without the dot)
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "csv" | "json" | "sql" | "xml" | "toml" | "yaml" | "yml" => Category::Data,
            "html" | "css" | "scss" | "erb" => Category::Web,
            "rb" | "c" | "cc" | "cpp" | "py" | "js" | "java" | "go" | "h" | "rs" | "ts" => {
                Category::Code
            }
            "dll" | "exe" => Category::Compiled,
            "txt" | "md" | "in" => Category::Textual,
            _ => Category::Undefined,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Data => "data",
            Category::Web => "web",
            Category::Code => "code",
            Category::Compiled => "compiled",
            Category::Textual => "textual",
            Category::Undefined => "undefined",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "data" => Ok(Category::Data),
            "web" => Ok(Category::Web),
            "code" => Ok(Category::Code),
            "compiled" => Ok(Category::Compiled),
            "textual" | "text" => Ok(Category::Textual),
            "undefined" => Ok(Category::Undefined),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// One physical line of one file plus its heuristic attributes.
///
/// The whole struct is the key of the text lookup in the label store, so two
/// lines with identical attribute tuples share one lookup slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabeledLine {
    pub filename: String,
    /// Absolute path of the file
    pub file_path: PathBuf,
    /// Extension without the dot
    pub file_type: String,
    pub category: Category,
    /// 1-based
    pub line_number: usize,
    pub has_comment: bool,
    pub has_variable_declaration: bool,
    pub has_object: bool,
    pub has_function: bool,
    pub has_domain: bool,
    /// Root-relative path of a file this line appears to import
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported_code: Option<String>,
}

impl LabeledLine {
    /// Location label shown next to a search hit
    pub fn location(&self) -> String {
        format!("{}, line {}", self.filename, self.line_number)
    }

    /// Whether the line declares a variable, a function or an object
    pub fn is_declaration(&self) -> bool {
        self.has_variable_declaration || self.has_function || self.has_object
    }
}

/// Per-node annotation shown beside explorer and dependency lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoView {
    #[default]
    Category,
    Functions,
    Objects,
    Domains,
    QueryHits,
}

impl InfoView {
    /// Rotation order of the views
    pub const ALL: [InfoView; 5] = [
        InfoView::Category,
        InfoView::Functions,
        InfoView::Objects,
        InfoView::Domains,
        InfoView::QueryHits,
    ];

    /// Select a view by mode index, wrapping around
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    /// The view after this one in the rotation
    #[allow(dead_code)]
    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Header label naming the view
    pub fn label(&self) -> &'static str {
        match self {
            InfoView::Category => "types",
            InfoView::Functions => "#functions",
            InfoView::Objects => "#objects",
            InfoView::Domains => "#web domains",
            InfoView::QueryHits => "last query",
        }
    }
}

impl std::str::FromStr for InfoView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(index) = s.parse::<usize>() {
            return Ok(InfoView::from_index(index));
        }
        match s.to_lowercase().as_str() {
            "types" | "type" | "category" => Ok(InfoView::Category),
            "functions" | "function" => Ok(InfoView::Functions),
            "objects" | "object" => Ok(InfoView::Objects),
            "domains" | "domain" => Ok(InfoView::Domains),
            "hits" | "query" | "last-query" => Ok(InfoView::QueryHits),
            _ => Err(format!("Unknown info view: {}", s)),
        }
    }
}

/// Query output: pages and their location labels, always of equal length
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSet {
    pub pages: Vec<String>,
    pub locations: Vec<String>,
}

impl PageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(["None"], ["None"])`
    pub fn none() -> Self {
        Self::message(NONE)
    }

    /// `(["invalid query"], ["None"])`
    pub fn invalid_query() -> Self {
        Self::message(INVALID_QUERY)
    }

    /// A single descriptive page with a `None` location
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            pages: vec![text.into()],
            locations: vec![NONE.to_string()],
        }
    }

    pub fn push(&mut self, page: impl Into<String>, location: impl Into<String>) {
        self.pages.push(page.into());
        self.locations.push(location.into());
    }

    /// Replace an empty set with the `None` sentinel
    pub fn or_none(self) -> Self {
        if self.is_empty() {
            Self::none()
        } else {
            self
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Whether this is the `None` sentinel
    #[allow(dead_code)]
    pub fn is_none(&self) -> bool {
        self.pages.len() == 1 && self.pages[0] == NONE && self.locations[0] == NONE
    }

    /// Iterate `(page, location)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pages
            .iter()
            .zip(self.locations.iter())
            .map(|(p, l)| (p.as_str(), l.as_str()))
    }
}
