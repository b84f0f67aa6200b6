//! Unified path management for blackboard files.
//!
//! Paths are resolved from the platform directories reported by the `dirs`
//! crate, with an application subdirectory appended.

use std::path::PathBuf;

const APP_DIR: &str = "blackboard";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config or data directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for blackboard.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/blackboard/        # Config directory
/// └── config.toml              # Application configuration
///
/// ~/.local/share/blackboard/   # Data directory
/// └── store.json               # Key-value store (session + blackboards)
/// ```
pub struct BlackboardPaths;

impl BlackboardPaths {
    /// Returns the blackboard configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the blackboard data directory.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the key-value store file.
    ///
    /// `StorageConfig::path` overrides this when set.
    pub fn store_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("store.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        let config_file = BlackboardPaths::config_file().unwrap();
        assert!(config_file.ends_with("blackboard/config.toml"));
        let config_dir = BlackboardPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_store_file() {
        let store_file = BlackboardPaths::store_file().unwrap();
        assert!(store_file.ends_with("store.json"));
        let data_dir = BlackboardPaths::data_dir().unwrap();
        assert!(store_file.starts_with(&data_dir));
    }
}
