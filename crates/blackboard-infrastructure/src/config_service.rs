//! Configuration service implementation.
//!
//! This module loads the application configuration from the configuration
//! file (~/.config/blackboard/config.toml).

use blackboard_core::config::AppConfig;
use blackboard_core::error::{BlackboardError, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::BlackboardPaths;

/// Loads and saves `AppConfig` as TOML.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Creates a service for the config file at `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a service for the platform default config file.
    pub fn new() -> Result<Self> {
        let path =
            BlackboardPaths::config_file().map_err(|e| BlackboardError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the config, falling back to defaults when the file is missing
    /// or empty.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigService] {} not found, using defaults",
                self.path.display()
            );
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            BlackboardError::config(format!(
                "Failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Writes `config` to the file, creating its directory if needed.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(config)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("nested/config.toml"));

        let mut config = AppConfig::default();
        config.log_level = "debug".to_string();
        config.storage.contexts.push("ideas".to_string());
        config.remote.api_base = Some("http://localhost:8080/PHP/".to_string());
        service.save(&config).unwrap();

        assert_eq!(service.load().unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "log_level = [").unwrap();

        let err = ConfigService::with_path(path).load().unwrap_err();
        assert!(matches!(err, BlackboardError::Config(_)));
    }
}
