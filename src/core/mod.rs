//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Labeled line and page set model
//! - Error types
//! - Path normalization utilities
//! - Explorer line formatting helpers
//! - Pagination of explorer output
//! - Rendering functions for different output formats

pub mod error;
pub mod model;
pub mod paginate;
pub mod paths;
pub mod render;
pub mod util;
