//! Line classifier
//!
//! Walks the root once, reads every candidate file and tags each line with
//! substring heuristics. Nothing here parses a language: the rules are plain
//! keyword tables evaluated independently per flag.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::core::error::{CodisError, Result};
use crate::core::model::{Category, LabeledLine};
use crate::core::paths::{file_name, has_git_segment, make_relative};
use crate::core::util::{extension_of, has_non_symbol, stem_of};

const COMMENT_KEYWORDS: &[&str] = &["//", "/*", "* ", "#"];
const DOMAIN_KEYWORDS: &[&str] = &["http://", "https://", ".com", ".nl"];

const VARIABLE_KEYWORDS: &[&str] = &[":=", "=", "let ", "var "];
const VARIABLE_VETO: &[&str] = &["==", "!=", "//", "/*", "#", "for", "if"];

const OBJECT_KEYWORDS: &[&str] = &["class ", "struct ", "enum "];
const OBJECT_VETO: &[&str] = &["=", ":=", "//", "/*", "#"];

const FUNCTION_KEYWORDS: &[&str] = &["def ", "fun ", "fn ", "func "];
const FUNCTION_VETO: &[&str] = &["//", "/*", "#", ":="];

/// A file selected for classification
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub name: String,
    /// Root-relative, '/'-separated
    pub relative: String,
}

/// A labeled line together with its text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub label: LabeledLine,
    pub text: String,
}

fn contains_any(line: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| line.contains(k))
}

/// Veto list first, then allow list; only code files qualify
fn declares(line: &str, category: Category, veto: &[&str], keywords: &[&str]) -> bool {
    category == Category::Code && !contains_any(line, veto) && contains_any(line, keywords)
}

pub fn has_comment(line: &str) -> bool {
    contains_any(line, COMMENT_KEYWORDS)
}

pub fn has_domain(line: &str) -> bool {
    contains_any(line, DOMAIN_KEYWORDS)
}

pub fn has_variable_declaration(line: &str, category: Category) -> bool {
    declares(line, category, VARIABLE_VETO, VARIABLE_KEYWORDS)
}

pub fn has_object(line: &str, category: Category) -> bool {
    declares(line, category, OBJECT_VETO, OBJECT_KEYWORDS)
}

pub fn has_function(line: &str, category: Category) -> bool {
    declares(line, category, FUNCTION_VETO, FUNCTION_KEYWORDS)
}

/// Known files a line may reference, in walk order
#[derive(Debug, Clone, Default)]
pub struct ImportTargets {
    entries: Vec<(String, String, String)>,
}

impl ImportTargets {
    pub fn new(files: &[SourceFile]) -> Self {
        let entries = files
            .iter()
            .map(|f| {
                (
                    f.name.clone(),
                    stem_of(&f.name).to_string(),
                    f.relative.clone(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Relative path of the first file whose name or stem occurs in the line
    pub fn find(&self, line: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, stem, _)| {
                line.contains(name.as_str()) || (!stem.is_empty() && line.contains(stem.as_str()))
            })
            .map(|(_, _, relative)| relative.as_str())
    }
}

/// List every classifiable file under `root` in walk order.
///
/// Skips `.git` segments, names without an extension and `.exe` files.
pub fn collect_files(root: &Path) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        let relative =
            make_relative(path, root).unwrap_or_else(|| path.to_string_lossy().into_owned());
        let name = file_name(path);

        if has_git_segment(Path::new(&relative)) || !name.contains('.') || name.ends_with(".exe") {
            continue;
        }

        files.push(SourceFile {
            path: path.to_path_buf(),
            name,
            relative,
        });
    }

    Ok(files)
}

/// Label every line of one file.
///
/// `code_started` flips on the first declaration-like line and from then on
/// no import references are collected for the file.
pub fn label_file(file: &SourceFile, text: &str, targets: &ImportTargets) -> Vec<ClassifiedLine> {
    let file_type = extension_of(&file.name).to_string();
    let category = Category::from_extension(&file_type);
    let mut code_started = false;

    text.split('\n')
        .enumerate()
        .map(|(index, line)| {
            let has_variable_declaration = has_variable_declaration(line, category);
            let has_object = has_object(line, category);
            let has_function = has_function(line, category);
            if has_variable_declaration || has_object || has_function {
                code_started = true;
            }

            let has_comment = has_comment(line);
            let imported_code = if category == Category::Code
                && !code_started
                && !has_comment
                && has_non_symbol(line)
            {
                targets.find(line).map(str::to_string)
            } else {
                None
            };

            ClassifiedLine {
                label: LabeledLine {
                    filename: file.name.clone(),
                    file_path: file.path.clone(),
                    file_type: file_type.clone(),
                    category,
                    line_number: index + 1,
                    has_comment,
                    has_variable_declaration,
                    has_object,
                    has_function,
                    has_domain: has_domain(line),
                    imported_code,
                },
                text: line.to_string(),
            }
        })
        .collect()
}

/// Walk `root` and classify every line of every file.
///
/// Any unreadable file aborts the whole run.
pub fn classify(root: &Path) -> Result<Vec<ClassifiedLine>> {
    let files = collect_files(root)?;
    let targets = ImportTargets::new(&files);
    let mut lines = Vec::new();

    for file in &files {
        let bytes = std::fs::read(&file.path).map_err(|source| CodisError::Read {
            path: file.path.clone(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        lines.extend(label_file(file, &text, &targets));
        debug!(file = %file.relative, "parsed");
    }

    Ok(lines)
}
