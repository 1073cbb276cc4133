//! Dependency explorer
//!
//! The graph comes from the per-line "imported code" attribute of the label
//! store. It is heuristic and may contain cycles.

use std::collections::HashSet;

use tracing::debug;

use crate::core::model::PageSet;
use crate::core::paginate::{Paginator, DEPENDENCY_EXPLORER};
use crate::core::paths::join_normalized;
use crate::core::util::id_prefix;
use crate::explore::Annotator;
use crate::index::store::{ImportMap, LabelStore};

/// File-to-file import edges keyed by root-relative path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: ImportMap,
}

impl DependencyGraph {
    /// Derive the graph from the store's import lists
    pub fn from_store(store: &LabelStore) -> Self {
        Self {
            edges: store.imports().clone(),
        }
    }

    #[allow(dead_code)]
    pub fn from_edges(edges: ImportMap) -> Self {
        Self { edges }
    }

    /// Imports of a file, empty when the file has none
    pub fn imports(&self, file: &str) -> &[String] {
        self.edges.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the file has outgoing edges
    pub fn contains(&self, file: &str) -> bool {
        self.edges.contains_key(file)
    }

    /// Files with outgoing edges that no file imports
    pub fn root_files(&self) -> Vec<String> {
        self.edges
            .keys()
            .filter(|candidate| {
                !self
                    .edges
                    .values()
                    .any(|imports| imports.iter().any(|i| i == *candidate))
            })
            .cloned()
            .collect()
    }
}

/// Mutable state of one render call
#[derive(Debug, Default)]
struct RenderContext {
    output: String,
    line_id: usize,
    /// Reset for every root
    visited: HashSet<String>,
}

fn render_imports(
    graph: &DependencyGraph,
    annotator: &Annotator,
    file: &str,
    indent: &str,
    ctx: &mut RenderContext,
) {
    ctx.visited.insert(file.to_string());
    let child_indent = format!("{}\t", indent);

    for imported in graph.imports(file) {
        ctx.line_id += 1;
        let line = format!("{}{}{}", id_prefix(ctx.line_id), indent, imported);
        let path = join_normalized(annotator.store().root(), imported);
        let info = annotator.annotate(&line, &path);
        ctx.output.push_str(&line);
        ctx.output.push_str(&info);

        if graph.contains(imported) && !ctx.visited.contains(imported) {
            render_imports(graph, annotator, imported, &child_indent, ctx);
        }
    }
}

/// Render one depth-first tree per start file.
///
/// Line ids run across the whole call. A file reachable from several starts
/// is rendered under each of them.
pub fn render_tree(graph: &DependencyGraph, starts: &[String], annotator: &Annotator) -> String {
    let mut ctx = RenderContext::default();

    for start in starts {
        ctx.visited.clear();
        ctx.output.push_str(&format!("{}> {}\n", id_prefix(ctx.line_id), start));
        render_imports(graph, annotator, start, "\t", &mut ctx);
        ctx.line_id += 1;
    }

    ctx.output
}

/// Pick the files to render for a query.
///
/// A query contained in a root file name selects that root; a query naming a
/// file of the graph exactly selects it; anything else selects every root.
pub fn select_starts(graph: &DependencyGraph, query: &str) -> Vec<String> {
    let roots = graph.root_files();
    if !query.is_empty() {
        if let Some(root) = roots.iter().find(|r| r.contains(query)) {
            return vec![root.clone()];
        }
        if graph.contains(query) {
            return vec![query.to_string()];
        }
    }
    roots
}

/// Paginated dependency tree for a query
pub fn show(store: &LabelStore, annotator: &Annotator, query: &str) -> PageSet {
    let graph = DependencyGraph::from_store(store);
    let starts = select_starts(&graph, query);
    debug!(%query, starts = starts.len(), "dependency explorer");

    if starts.is_empty() {
        return PageSet::none();
    }
    let rendered = render_tree(&graph, &starts, annotator);
    Paginator::new(DEPENDENCY_EXPLORER).paginate(&rendered, annotator.view())
}
