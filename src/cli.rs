//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::model::{Category, InfoView, PageSet};
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::explore::overview::OverviewPane;
use crate::explore::tree::{ExploreOptions, DEFAULT_MAX_DEPTH};
use crate::search::SearchFilter;
use crate::session::Session;

/// codis - search and browse a source tree from the command line.
#[derive(Parser, Debug)]
#[command(name = "codis")]
#[command(
    author,
    version,
    about,
    long_about = r#"codis classifies every line of every file under ROOT with heuristic
attributes (comment, declaration, object, function, web domain, import) and
answers queries against that corpus.

Each command prints a page set: an ordered list of pages, each paired with a
location label. Queries with nothing to show print a single "None" page.

Output formats:
- jsonl: one {"index","location","page"} object per line (default)
- json: a single JSON array
- md: one Markdown section per page
- raw: location header followed by the page text

Examples:
    codis search "fn main"
    codis fuzzy prntln --category code
    codis explore --info functions
    codis explore 4
    codis deps main.go --hits TODO --info hits
    codis related main.go 12
    codis files src/ --imports
"#
)]
pub struct Cli {
    /// Root directory to index.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory to index (defaults to the current directory).\n\n\
Every file below ROOT is read once at startup. Relative paths in results are\n\
relative to this root."
    )]
    pub root: PathBuf,

    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for the page set.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw"
    )]
    pub format: String,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors. Only raw output is colored."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Only log errors to stderr. Results are still printed to stdout.\n\
RUST_LOG takes precedence when set."
    )]
    pub quiet: bool,

    /// Verbose mode (debug logging on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Log debug diagnostics to stderr: one line per classified file and per\n\
query. RUST_LOG takes precedence when set."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on md/raw formats."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search lines with a regular expression.
    #[command(
        long_about = "Match every line of the corpus against a regular expression.\n\n\
Each hit is one page: the hit line with two lines of context on each side,\n\
located as \"<file>, line <N>\". A malformed pattern yields \"invalid query\".\n\n\
Examples:\n\
  codis search \"fn \\w+\\(\"\n\
  codis search TODO --category code --no-comments\n"
    )]
    Search {
        /// Regular expression to match.
        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// Only search files of these categories (repeatable).
        #[arg(long, value_name = "CATEGORY")]
        category: Vec<Category>,

        /// Skip lines that contain a comment marker.
        #[arg(long)]
        no_comments: bool,
    },

    /// Search lines approximately.
    #[command(
        long_about = "Score every line against QUERY, case-insensitively, crediting query\n\
characters found in order and adjacent in the line (one query character may\n\
be skipped at a time). Lines scoring above half the query length are hits,\n\
reported in corpus order.\n\n\
Examples:\n\
  codis fuzzy prntln\n\
  codis fuzzy hndlr --category code\n"
    )]
    Fuzzy {
        /// Approximate text to look for.
        #[arg(value_name = "QUERY")]
        query: String,

        /// Only search files of these categories (repeatable).
        #[arg(long, value_name = "CATEGORY")]
        category: Vec<Category>,

        /// Skip lines that contain a comment marker.
        #[arg(long)]
        no_comments: bool,
    },

    /// Browse the file tree.
    #[command(
        long_about = "Render the directory tree below ROOT, 15 lines per page. Every line has an\n\
id; passing an id as QUERY zooms into that entry with a fresh walk.\n\n\
Examples:\n\
  codis explore\n\
  codis explore --dirs-only --max-depth 2\n\
  codis explore 7 --info objects\n"
    )]
    Explore {
        /// Entry id to zoom into.
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,

        /// Maximum depth to expand directories to.
        #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Only show directories.
        #[arg(long)]
        dirs_only: bool,

        /// Info view shown beside each line.
        #[arg(
            long,
            value_name = "VIEW",
            default_value = "types",
            long_help = "Info view shown beside each line.\n\n\
Supported values (or their index 0-4):\n\
- types: file category\n\
- functions: number of function lines\n\
- objects: number of object lines\n\
- domains: number of lines with a web domain\n\
- hits: lines hit by the --hits pattern"
        )]
        info: InfoView,

        /// Regular expression whose per-file hit counts feed the `hits` view.
        #[arg(long, value_name = "PATTERN")]
        hits: Option<String>,
    },

    /// Browse the heuristic import tree.
    #[command(
        long_about = "Render the files that import other files as an indented tree, starting\n\
from files nothing imports. QUERY narrows the start to a matching root file,\n\
or to a graph file named exactly.\n\n\
Examples:\n\
  codis deps\n\
  codis deps main --info functions\n"
    )]
    Deps {
        /// Root file (substring) or graph file (exact) to start from.
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,

        /// Info view shown beside each line.
        #[arg(long, value_name = "VIEW", default_value = "types")]
        info: InfoView,

        /// Regular expression whose per-file hit counts feed the `hits` view.
        #[arg(long, value_name = "PATTERN")]
        hits: Option<String>,
    },

    /// Find declarations related to a line.
    #[command(
        long_about = "Split the selected line into identifiers and list every declaration line\n\
(variable, function or object) that mentions one of them.\n\n\
Examples:\n\
  codis related main.go 12\n"
    )]
    Related {
        /// File name (not path) of the selected line.
        #[arg(value_name = "FILE")]
        file: String,

        /// 1-based line number.
        #[arg(value_name = "LINE")]
        line: usize,
    },

    /// Summarize files.
    #[command(
        long_about = "Show one page per file whose relative path contains QUERY: declarations\n\
for code, field names for data, a preview otherwise. --imports switches to the\n\
second pane (imports for code, preview for data).\n\n\
Examples:\n\
  codis files src/\n\
  codis files --category data\n"
    )]
    Files {
        /// Substring of the relative path.
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,

        /// Show the second pane.
        #[arg(long)]
        imports: bool,

        /// Only list files of these categories (repeatable).
        #[arg(long, value_name = "CATEGORY")]
        category: Vec<Category>,
    },
}

/// Initialize stderr logging; RUST_LOG overrides the flags
pub fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print(pages: &PageSet, config: RenderConfig) -> Result<()> {
    let renderer = Renderer::with_config(config);
    renderer
        .render_to(pages, std::io::stdout().lock())
        .context("Failed to write output")
}

pub fn run(cli: Cli) -> Result<()> {
    // Parse output format
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty).with_color(!cli.no_color);

    let mut session = Session::open(&cli.root)
        .with_context(|| format!("Failed to index {}", cli.root.display()))?;

    let pages = match cli.command {
        Commands::Search {
            pattern,
            category,
            no_comments,
        } => session.basic(&pattern, &search_filter(category, no_comments)),

        Commands::Fuzzy {
            query,
            category,
            no_comments,
        } => session.fuzzy(&query, &search_filter(category, no_comments)),

        Commands::Explore {
            query,
            max_depth,
            dirs_only,
            info,
            hits,
        } => {
            if let Some(pattern) = hits {
                session.basic(&pattern, &SearchFilter::default());
            }
            let options = ExploreOptions {
                max_depth,
                dirs_only,
                view: info,
            };
            session
                .explore(&query, &options)
                .with_context(|| format!("Failed to explore {}", query))?
        }

        Commands::Deps { query, info, hits } => {
            if let Some(pattern) = hits {
                session.basic(&pattern, &SearchFilter::default());
            }
            session.dependencies(&query, info)
        }

        Commands::Related { file, line } => session.related(&file, line),

        Commands::Files {
            query,
            imports,
            category,
        } => {
            let pane = if imports {
                OverviewPane::Secondary
            } else {
                OverviewPane::Primary
            };
            session.files(&query, &search_filter(category, false), pane)
        }
    };

    print(&pages, render_config)
}

fn search_filter(categories: Vec<Category>, no_comments: bool) -> SearchFilter {
    SearchFilter {
        categories,
        include_comments: !no_comments,
    }
}
