//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer; every field has a
//! default so a missing or partial file still yields a usable config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Context that owns the legacy single-blackboard key and serves as the
/// primary context when the caller does not name one.
pub const PRIMARY_CONTEXT: &str = "log";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub storage: StorageConfig,
    pub remote: RemoteConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            storage: StorageConfig::default(),
            remote: RemoteConfig::default(),
        }
    }
}

/// Local persistence settings and key naming.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Prefix shared by every persisted key.
    pub prefix: String,
    /// Contexts loaded eagerly at startup.
    pub contexts: Vec<String>,
    /// Overrides the platform default location of the store file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            prefix: "wpp".to_string(),
            contexts: vec![PRIMARY_CONTEXT.to_string(), "todo".to_string()],
            path: None,
        }
    }
}

impl StorageConfig {
    /// Key holding the serialized user session.
    pub fn session_key(&self) -> String {
        format!("{}_user_data", self.prefix)
    }

    /// Key holding the blackboard of `context`.
    pub fn blackboard_key(&self, context: &str) -> String {
        format!("{}_blackboard_{}", self.prefix, context)
    }

    /// Key used before blackboards were split per context.
    pub fn legacy_key(&self) -> String {
        format!("{}_blackboard_data", self.prefix)
    }
}

/// Backend connection settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL the endpoint paths are appended to, e.g.
    /// `http://localhost:8080/PHP/`. `None` runs offline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let storage = StorageConfig::default();
        assert_eq!(storage.session_key(), "wpp_user_data");
        assert_eq!(storage.blackboard_key("todo"), "wpp_blackboard_todo");
        assert_eq!(storage.legacy_key(), "wpp_blackboard_data");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [remote]
            api_base = "http://localhost:8080/PHP/"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.storage.contexts, vec!["log", "todo"]);
        assert_eq!(
            config.remote.api_base.as_deref(),
            Some("http://localhost:8080/PHP/")
        );
        assert_eq!(config.remote.timeout_secs, 10);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
