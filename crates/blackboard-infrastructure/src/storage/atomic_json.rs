//! Atomic JSON file operations.
//!
//! Provides a thin layer for safe read-modify-write access to a JSON file
//! shared by more than one process.

use blackboard_core::error::BlackboardError;
use fs2::FileExt;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur during atomic JSON operations.
#[derive(Debug, Error)]
pub enum AtomicJsonError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<AtomicJsonError> for BlackboardError {
    fn from(err: AtomicJsonError) -> Self {
        match err {
            AtomicJsonError::Io(e) => e.into(),
            AtomicJsonError::Json(e) => e.into(),
            AtomicJsonError::Lock(message) => BlackboardError::storage(message),
        }
    }
}

/// A handle to a JSON file updated atomically.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: An exclusive lock file serializes read-modify-write cycles
/// - **Durability**: Explicit fsync before rename
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Serializes `data` and replaces the file with it atomically.
    ///
    /// Callers that read before writing must hold the lock; use `update`.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        let dir = self.dir();
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(data)?;

        // Unique per writer.
        let mut tmp_file = NamedTempFile::new_in(dir)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.as_file().sync_all()?;
        tmp_file
            .persist(&self.path)
            .map_err(|e| AtomicJsonError::Io(e.error))?;

        Ok(())
    }

    /// Performs a locked read-modify-write cycle.
    ///
    /// `f` receives the current contents (or `default_value` if the file does
    /// not exist) and its changes are written back when it returns.
    pub fn update<F, R>(&self, default_value: T, f: F) -> Result<R, AtomicJsonError>
    where
        F: FnOnce(&mut T) -> R,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        let result = f(&mut data);
        self.save(&data)?;

        Ok(result)
    }

    /// Like `update`, but contents that no longer parse are replaced by
    /// `default_value` instead of failing.
    pub fn update_or_reset<F, R>(&self, default_value: T, f: F) -> Result<R, AtomicJsonError>
    where
        F: FnOnce(&mut T) -> R,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = match self.load() {
            Ok(loaded) => loaded.unwrap_or(default_value),
            Err(AtomicJsonError::Json(e)) => {
                tracing::warn!(
                    "[AtomicJsonFile] Resetting unreadable {}: {}",
                    self.path.display(),
                    e
                );
                default_value
            }
            Err(e) => return Err(e),
        };
        let result = f(&mut data);
        self.save(&data)?;

        Ok(result)
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

/// An exclusive lock on `<path>.lock`, released when dropped.
///
/// The lock file is never deleted. Removing it while held would let a waiter
/// lock the unlinked inode while a newcomer locks a fresh file.
struct FileLock {
    _file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicJsonError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| AtomicJsonError::Lock(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { _file: file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::thread;
    use tempfile::TempDir;

    type Map = BTreeMap<String, u32>;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Map>::new(temp_dir.path().join("missing.json"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.json");
        fs::write(&path, "  \n").unwrap();
        let file = AtomicJsonFile::<Map>::new(path);
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_creates_then_modifies() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Map>::new(temp_dir.path().join("nested/data.json"));

        file.update(Map::new(), |m| {
            m.insert("count".to_string(), 10);
        })
        .unwrap();
        let previous = file
            .update(Map::new(), |m| {
                let entry = m.entry("count".to_string()).or_default();
                let before = *entry;
                *entry += 5;
                before
            })
            .unwrap();

        assert_eq!(previous, 10);
        assert_eq!(file.load().unwrap().unwrap()["count"], 15);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        let file = AtomicJsonFile::<Map>::new(path.clone());

        file.update(Map::new(), |m| {
            m.insert("a".to_string(), 1);
        })
        .unwrap();

        let mut names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["data.json", "data.lock"]);
    }

    #[test]
    fn test_concurrent_updates_are_serialized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.json");
        let threads: u32 = 8;
        let rounds: u32 = 50;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let path = path.clone();
                thread::spawn(move || {
                    // One handle per thread, like separate processes.
                    let file = AtomicJsonFile::<Map>::new(path);
                    for _ in 0..rounds {
                        file.update(Map::new(), |m| {
                            *m.entry("count".to_string()).or_default() += 1;
                        })
                        .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let file = AtomicJsonFile::<Map>::new(path);
        assert_eq!(file.load().unwrap().unwrap()["count"], threads * rounds);
    }

    #[test]
    fn test_update_or_reset_replaces_corrupt_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, "{oops").unwrap();
        let file = AtomicJsonFile::<Map>::new(path);

        assert!(file.update(Map::new(), |_| ()).is_err());
        file.update_or_reset(Map::new(), |m| {
            m.insert("fresh".to_string(), 1);
        })
        .unwrap();

        let map = file.load().unwrap().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["fresh"], 1);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, "{oops").unwrap();
        let file = AtomicJsonFile::<Map>::new(path);

        let err = file.load().unwrap_err();
        assert!(matches!(err, AtomicJsonError::Json(_)));
        let converted: BlackboardError = err.into();
        assert!(converted.is_serialization());
    }
}
