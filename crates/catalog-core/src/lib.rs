//! Catalog Core - query engine and supporting services for the interview question catalog
//!
//! This crate provides:
//! - Corpus loading and invariant checks (bundled or file-backed JSON)
//! - The query engine: facet filtering, stable ordering, pagination
//! - Related-question selection
//! - Session-local vote overlay for solutions
//! - Bookmark repository abstraction with memory and file backends
//! - Catalog statistics
//! - Configuration management

pub mod bookmarks;
pub mod config;
pub mod corpus;
pub mod error;
pub mod query;
pub mod stats;
pub mod votes;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use bookmarks::{BookmarkStore, FileBookmarkStore, MemoryBookmarkStore};
pub use config::CatalogConfig;
pub use corpus::Corpus;
pub use error::{CatalogError, Result};
pub use query::{query, FilterSet, QueryEngine, QueryPage, SortKey};
pub use stats::CatalogStats;
pub use votes::{Vote, VoteDelta, VoteLedger};
