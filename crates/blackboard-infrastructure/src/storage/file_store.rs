//! File-backed key-value store.
//!
//! All keys live in a single JSON object on disk. Every write is a locked
//! read-modify-write of the whole file, so handles sharing the file
//! interleave at key granularity and the last write to a key wins.

use blackboard_core::error::{BlackboardError, Result};
use blackboard_core::storage::KeyValueStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::atomic_json::AtomicJsonFile;
use crate::paths::BlackboardPaths;

type Entries = BTreeMap<String, String>;

/// A `KeyValueStore` persisted as one JSON file.
///
/// # Example
///
/// ```no_run
/// use blackboard_core::storage::KeyValueStore;
/// use blackboard_infrastructure::FileKeyValueStore;
///
/// let store = FileKeyValueStore::new("/tmp/blackboard/store.json");
/// store.set("wpp_blackboard_log", "{}").unwrap();
/// ```
pub struct FileKeyValueStore {
    file: AtomicJsonFile<Entries>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicJsonFile::new(path.into()),
        }
    }

    /// Opens the store at the platform default location.
    pub fn open_default() -> Result<Self> {
        let path = BlackboardPaths::store_file()
            .map_err(|e| BlackboardError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Applies `f` to the stored entries under the file lock.
    ///
    /// A file that no longer parses is replaced rather than left to block
    /// every later write.
    fn modify(&self, f: impl FnOnce(&mut Entries)) -> Result<()> {
        self.file
            .update_or_reset(Entries::new(), f)
            .map_err(BlackboardError::from)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.file.load()?;
        Ok(entries.and_then(|mut entries| entries.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.path().exists() {
            return Ok(());
        }
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}
