//! Bookmark repository
//!
//! A key-value store of bookmarked question ids, injected into the
//! presentation layer. The query engine never reads or writes it.
//!
//! Two backends are provided:
//! - `MemoryBookmarkStore`: process-local, lost on restart
//! - `FileBookmarkStore`: mirrors the id list to a JSON file on every change

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::error::Result;

/// Trait for bookmark backends
pub trait BookmarkStore: Send + Sync {
    /// Whether the question is bookmarked
    fn get(&self, question_id: &str) -> bool;

    /// Bookmark or un-bookmark a question
    fn set(&self, question_id: &str, bookmarked: bool) -> Result<()>;

    /// Bookmarked ids, oldest first
    fn list(&self) -> Vec<String>;

    /// Flip the flag and return the new state
    fn toggle(&self, question_id: &str) -> Result<bool> {
        let next = !self.get(question_id);
        self.set(question_id, next)?;
        Ok(next)
    }

    fn count(&self) -> usize {
        self.list().len()
    }
}

/// Apply a set/unset to an ordered id list; returns true if it changed
fn update_ids(ids: &mut Vec<String>, question_id: &str, bookmarked: bool) -> bool {
    let position = ids.iter().position(|id| id == question_id);
    match (bookmarked, position) {
        (true, None) => {
            ids.push(question_id.to_string());
            true
        }
        (false, Some(idx)) => {
            ids.remove(idx);
            true
        }
        _ => false,
    }
}

#[derive(Debug, Default)]
pub struct MemoryBookmarkStore {
    ids: RwLock<Vec<String>>,
}

impl MemoryBookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookmarkStore for MemoryBookmarkStore {
    fn get(&self, question_id: &str) -> bool {
        let ids = self.ids.read().unwrap_or_else(PoisonError::into_inner);
        ids.iter().any(|id| id == question_id)
    }

    fn set(&self, question_id: &str, bookmarked: bool) -> Result<()> {
        let mut ids = self.ids.write().unwrap_or_else(PoisonError::into_inner);
        update_ids(&mut ids, question_id, bookmarked);
        Ok(())
    }

    fn list(&self) -> Vec<String> {
        self.ids
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Bookmarks persisted as a JSON array of question ids
#[derive(Debug)]
pub struct FileBookmarkStore {
    path: PathBuf,
    ids: RwLock<Vec<String>>,
}

impl FileBookmarkStore {
    /// Open the store at `path`; a missing file starts empty
    pub fn open(path: &Path) -> Result<Self> {
        let ids: Vec<String> = if path.exists() {
            let json = std::fs::read_to_string(path)?;
            serde_json::from_str(&json)?
        } else {
            Vec::new()
        };

        tracing::info!("Opened bookmark store at {} ({} ids)", path.display(), ids.len());

        Ok(Self {
            path: path.to_path_buf(),
            ids: RwLock::new(ids),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, ids: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(ids)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl BookmarkStore for FileBookmarkStore {
    fn get(&self, question_id: &str) -> bool {
        let ids = self.ids.read().unwrap_or_else(PoisonError::into_inner);
        ids.iter().any(|id| id == question_id)
    }

    fn set(&self, question_id: &str, bookmarked: bool) -> Result<()> {
        let mut ids = self.ids.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = ids.clone();
        if update_ids(&mut next, question_id, bookmarked) {
            // Memory only follows once the file has the new list
            self.persist(&next)?;
            *ids = next;
            tracing::debug!(
                "Bookmark {} set to {} in {}",
                question_id,
                bookmarked,
                self.path().display()
            );
        }
        Ok(())
    }

    fn list(&self) -> Vec<String> {
        self.ids
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn exercise(store: &dyn BookmarkStore) {
        assert!(!store.get("q1"));
        store.set("q1", true).unwrap();
        store.set("q3", true).unwrap();
        store.set("q1", true).unwrap();
        assert!(store.get("q1"));
        assert_eq!(store.list(), vec!["q1", "q3"]);

        assert!(!store.toggle("q1").unwrap());
        assert!(store.toggle("q2").unwrap());
        assert_eq!(store.list(), vec!["q3", "q2"]);
        assert_eq!(store.count(), 2);

        store.set("q404", false).unwrap();
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryBookmarkStore::new());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&FileBookmarkStore::open(&dir.path().join("bookmarks.json")).unwrap());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("bookmarks.json");

        let store = FileBookmarkStore::open(&path).unwrap();
        store.set("q7", true).unwrap();
        store.set("q2", true).unwrap();
        drop(store);

        let reopened = FileBookmarkStore::open(&path).unwrap();
        assert_eq!(reopened.list(), vec!["q7", "q2"]);
        assert!(reopened.get("q2"));
    }

    #[test]
    fn test_failed_write_leaves_bookmarks_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let path = blocker.join("bookmarks.json");
        let store = FileBookmarkStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());

        assert!(store.set("q1", true).is_err());
        assert!(!store.get("q1"));
        assert!(store.list().is_empty());
        assert!(store.toggle("q2").is_err());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        std::fs::write(&path, "{\"not\": \"a list\"}").unwrap();
        assert!(FileBookmarkStore::open(&path).is_err());
    }
}
