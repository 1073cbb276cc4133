//! Error types for index construction
//!
//! Query failures are never errors: they come back as sentinel page sets.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CodisError {
    #[error("Failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodisError>;
