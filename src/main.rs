//! codis - A local source-tree search engine
//!
//! codis provides:
//! - Line classification with text heuristics (no parsing)
//! - Regular expression and fuzzy line search
//! - File explorer with zoom and per-file annotations
//! - Heuristic dependency tree and related-line lookup
//! - Unified output format (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod explore;
mod index;
mod search;
mod session;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.quiet, cli.verbose);
    cli::run(cli)
}
