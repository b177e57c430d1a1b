//! Application state for the Catalog API
//!
//! Holds the read-only query engine plus the session overlays (bookmarks, votes).

use anyhow::Result;
use catalog_core::{BookmarkStore, CatalogConfig, QueryEngine, VoteLedger};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Shared application state
pub struct AppState {
    /// Query engine over the immutable corpus
    pub engine: QueryEngine,
    /// Bookmarked question ids
    pub bookmarks: Arc<dyn BookmarkStore>,
    /// Votes cast since startup
    pub votes: RwLock<VoteLedger>,
    /// Paging limits and data sources
    pub config: CatalogConfig,
}

impl AppState {
    /// Initialize application state from configuration
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.data_path.is_none() {
            info!("Loading bundled catalog");
        }
        let corpus = config.load_corpus()?;
        info!(
            "Catalog loaded: {} questions, {} solutions",
            corpus.len(),
            corpus.solutions().len()
        );

        let bookmarks = config.open_bookmarks()?;
        info!("Bookmark store ready ({} bookmarked)", bookmarks.count());

        Ok(Self::from_parts(QueryEngine::new(corpus), bookmarks, config))
    }

    pub fn from_parts(
        engine: QueryEngine,
        bookmarks: Arc<dyn BookmarkStore>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            engine,
            bookmarks,
            votes: RwLock::new(VoteLedger::new()),
            config,
        }
    }
}
