//! Configuration management for the catalog
//!
//! Selects the catalog data source, the paging limits and the bookmark backend.

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::bookmarks::{BookmarkStore, FileBookmarkStore, MemoryBookmarkStore};
use crate::corpus::Corpus;
use crate::query::DEFAULT_PAGE_SIZE;

/// Largest page a caller may request unless configured otherwise
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Catalog configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Catalog JSON file; `None` uses the bundled catalog
    pub data_path: Option<PathBuf>,
    /// Page size when a request does not give one
    pub page_size: usize,
    /// Upper bound on requested page sizes
    pub max_page_size: usize,
    /// Bookmark file; `None` keeps bookmarks in memory
    pub bookmarks_path: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            bookmarks_path: None,
        }
    }
}

impl CatalogConfig {
    /// Use a catalog file instead of the bundled data
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// Persist bookmarks to a file
    pub fn with_bookmarks_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.bookmarks_path = Some(path.into());
        self
    }

    pub fn with_page_size(mut self, page_size: usize, max_page_size: usize) -> Self {
        self.page_size = page_size;
        self.max_page_size = max_page_size;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Expected variables:
    /// - CATALOG_DATA_PATH: catalog JSON file (default: bundled catalog)
    /// - CATALOG_PAGE_SIZE: default page size (default: 20)
    /// - CATALOG_MAX_PAGE_SIZE: largest page size a request may ask for (default: 100)
    /// - CATALOG_BOOKMARKS_PATH: bookmark file (default: in-memory bookmarks)
    pub fn from_env() -> Result<Self> {
        let data_path = std::env::var("CATALOG_DATA_PATH").ok().map(PathBuf::from);
        let bookmarks_path = std::env::var("CATALOG_BOOKMARKS_PATH").ok().map(PathBuf::from);

        let page_size = parse_env_usize("CATALOG_PAGE_SIZE")?.unwrap_or(DEFAULT_PAGE_SIZE);
        let max_page_size =
            parse_env_usize("CATALOG_MAX_PAGE_SIZE")?.unwrap_or(DEFAULT_MAX_PAGE_SIZE);

        let config = Self {
            data_path,
            page_size,
            max_page_size,
            bookmarks_path,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(anyhow!("Page size must be at least 1"));
        }
        if self.max_page_size < self.page_size {
            return Err(anyhow!(
                "Max page size {} is smaller than page size {}",
                self.max_page_size,
                self.page_size
            ));
        }
        Ok(())
    }

    /// Requested page size, defaulted and capped
    pub fn clamp_page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.page_size)
            .clamp(1, self.max_page_size.max(1))
    }

    /// Load the configured catalog
    pub fn load_corpus(&self) -> Result<Corpus> {
        match &self.data_path {
            Some(path) => Corpus::load(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display())),
            None => Corpus::bundled().context("Bundled catalog is invalid"),
        }
    }

    /// Open the configured bookmark backend
    pub fn open_bookmarks(&self) -> Result<Arc<dyn BookmarkStore>> {
        match &self.bookmarks_path {
            Some(path) => {
                let store = FileBookmarkStore::open(path)
                    .with_context(|| format!("Failed to open bookmarks at {}", path.display()))?;
                Ok(Arc::new(store))
            }
            None => Ok(Arc::new(MemoryBookmarkStore::new())),
        }
    }
}

fn parse_env_usize(name: &str) -> Result<Option<usize>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|e| anyhow!("Invalid {}={:?}: {}", name, value, e)),
        Err(_) => Ok(None),
    }
}
