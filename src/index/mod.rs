//! Corpus construction: line classification and the label store

pub mod classify;
pub mod store;
