use thiserror::Error;

/// Errors raised by the catalog
///
/// Only [`CatalogError::NotFound`] can come out of a lookup against a loaded
/// corpus. The remaining variants are load-time or persistence failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No record with this id exists
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The catalog data broke a corpus invariant (duplicate id, dangling reference, ...)
    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn question_not_found(id: &str) -> Self {
        CatalogError::NotFound {
            kind: "Question",
            id: id.to_string(),
        }
    }

    pub fn solution_not_found(id: &str) -> Self {
        CatalogError::NotFound {
            kind: "Solution",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
