//! Storage layer for atomic file operations.

mod atomic_json;
mod file_store;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use file_store::FileKeyValueStore;
