//! File explorer
//!
//! The tree is an arena of nodes built from one filesystem walk. Parent links
//! are plain indices used for navigation only.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::error::Result;
use crate::core::model::{InfoView, PageSet};
use crate::core::paginate::{Paginator, FILE_EXPLORER};
use crate::core::paths::file_name;
use crate::core::util::{file_mode, id_prefix, mtime_ms};
use crate::explore::Annotator;

/// Index of a node in its tree
pub type NodeId = usize;

/// Default depth to which directories are expanded
pub const DEFAULT_MAX_DEPTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    pub mode: u32,
    /// Modification time in milliseconds since epoch
    pub mtime_ms: i64,
    pub is_dir: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileTreeNode {
    pub path: PathBuf,
    pub meta: FileMeta,
    /// Files first (latest discovered first), then directories
    pub children: Vec<NodeId>,
    #[serde(skip)]
    pub parent: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct FileTree {
    nodes: Vec<FileTreeNode>,
    root: NodeId,
}

/// Rendering options of the file explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExploreOptions {
    pub max_depth: usize,
    pub dirs_only: bool,
    pub view: InfoView,
}

impl Default for ExploreOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            dirs_only: false,
            view: InfoView::default(),
        }
    }
}

impl FileTree {
    /// Walk `root` and link every entry to its parent directory
    pub fn build(root: &Path) -> Result<Self> {
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()?.join(root)
        };

        let mut nodes = Vec::new();
        let mut ids: HashMap<PathBuf, NodeId> = HashMap::new();

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry?;
            let metadata = entry.metadata()?;
            let path = entry.path().to_path_buf();

            ids.insert(path.clone(), nodes.len());
            nodes.push(FileTreeNode {
                meta: FileMeta {
                    name: file_name(&path),
                    size: metadata.len(),
                    mode: file_mode(&metadata),
                    mtime_ms: mtime_ms(&metadata),
                    is_dir: metadata.is_dir(),
                },
                path,
                children: Vec::new(),
                parent: None,
            });
        }

        let mut tree_root = 0;
        for id in 0..nodes.len() {
            let parent = nodes[id].path.parent().and_then(|p| ids.get(p)).copied();
            match parent {
                Some(parent) => {
                    nodes[id].parent = Some(parent);
                    if nodes[id].meta.is_dir {
                        nodes[parent].children.push(id);
                    } else {
                        nodes[parent].children.insert(0, id);
                    }
                }
                None => tree_root = id,
            }
        }

        debug!(root = %root.display(), nodes = nodes.len(), "file tree built");
        Ok(Self {
            nodes,
            root: tree_root,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &FileTreeNode {
        &self.nodes[id]
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[allow(dead_code)]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Child paths of a node in display order
    #[allow(dead_code)]
    pub fn child_names(&self, id: NodeId) -> Vec<&str> {
        self.nodes[id]
            .children
            .iter()
            .map(|&c| self.nodes[c].meta.name.as_str())
            .collect()
    }

    /// Whether the renderer descends into this node's children.
    ///
    /// Any path containing `.git` stays collapsed, `.github` included.
    fn expands(&self, id: NodeId, depth: usize, max_depth: usize) -> bool {
        depth < max_depth && !self.nodes[id].path.to_string_lossy().contains(".git")
    }

    /// Path of the node shown with display id `ordinal` in a full render
    pub fn path_of_ordinal(&self, ordinal: usize, max_depth: usize) -> Option<&Path> {
        let mut search = OrdinalSearch {
            next: 0,
            target: ordinal,
            found: None,
        };
        self.find_ordinal(self.root, 0, max_depth, &mut search);
        search.found.map(|id| self.nodes[id].path.as_path())
    }

    fn find_ordinal(
        &self,
        id: NodeId,
        depth: usize,
        max_depth: usize,
        search: &mut OrdinalSearch,
    ) {
        if search.found.is_some() {
            return;
        }
        if search.next == search.target {
            search.found = Some(id);
            return;
        }
        search.next += 1;

        if self.expands(id, depth, max_depth) {
            for &child in &self.nodes[id].children {
                self.find_ordinal(child, depth + 1, max_depth, search);
            }
        }
    }
}

/// Counter state of one zoom lookup
#[derive(Debug)]
struct OrdinalSearch {
    next: usize,
    target: usize,
    found: Option<NodeId>,
}

/// Output state of one render
#[derive(Debug)]
struct TreeRenderContext {
    output: String,
    next_id: usize,
}

fn render_node(
    tree: &FileTree,
    id: NodeId,
    indent: &str,
    depth: usize,
    options: &ExploreOptions,
    annotator: &Annotator,
    ctx: &mut TreeRenderContext,
) {
    let display_id = ctx.next_id;
    ctx.next_id += 1;
    let node = tree.node(id);

    if node.children.is_empty() {
        if !options.dirs_only {
            let line = format!("{}{}- {}", id_prefix(display_id), indent, node.meta.name);
            let info = annotator.annotate(&line, &node.path);
            ctx.output.push_str(&line);
            ctx.output.push_str(&info);
        }
        return;
    }

    let line = format!("{}{}/ {}", id_prefix(display_id), indent, node.meta.name);
    let info = annotator.blank(&line);
    ctx.output.push_str(&line);
    ctx.output.push_str(&info);

    if tree.expands(id, depth, options.max_depth) {
        let child_indent = format!("{}\t", indent);
        for &child in &node.children {
            render_node(tree, child, &child_indent, depth + 1, options, annotator, ctx);
        }
    }
}

/// Depth-first, pre-order render starting at display id `first_id`
pub fn render_tree(
    tree: &FileTree,
    options: &ExploreOptions,
    annotator: &Annotator,
    first_id: usize,
) -> String {
    let mut ctx = TreeRenderContext {
        output: String::new(),
        next_id: first_id,
    };
    render_node(tree, tree.root(), "\t", 0, options, annotator, &mut ctx);
    ctx.output
}

/// Paginated file explorer.
///
/// A query that parses as an integer zooms into the node with that display
/// id, re-walking the filesystem below it.
pub fn show(
    tree: &FileTree,
    annotator: &Annotator,
    options: &ExploreOptions,
    query: &str,
) -> Result<PageSet> {
    let paginator = Paginator::new(FILE_EXPLORER);

    let Ok(ordinal) = query.trim().parse::<usize>() else {
        let rendered = render_tree(tree, options, annotator, 0);
        return Ok(paginator.paginate(&rendered, options.view));
    };

    let Some(path) = tree.path_of_ordinal(ordinal, options.max_depth) else {
        warn!(ordinal, "zoom target not found");
        return Ok(PageSet::message(format!("no entry with id {}", ordinal)));
    };

    let zoomed = FileTree::build(path)?;
    let rendered = render_tree(&zoomed, options, annotator, ordinal);
    Ok(paginator.paginate(&rendered, options.view))
}
