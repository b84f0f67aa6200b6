use anyhow::{Context, Result};
use blackboard_core::BlackboardStore;
use blackboard_core::config::AppConfig;
use blackboard_core::storage::KeyValueStore;
use blackboard_core::sync::{OfflineTransport, SyncTransport};
use blackboard_infrastructure::{ConfigService, FileKeyValueStore};
use blackboard_interaction::HttpSyncTransport;
use colored::Colorize;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Config service for `path`, or for the platform default location.
pub fn config_service(path: Option<PathBuf>) -> Result<ConfigService> {
    match path {
        Some(path) => Ok(ConfigService::with_path(path)),
        None => ConfigService::new().context("Failed to locate config directory"),
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `log_level`.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Builds the store from config: file storage plus HTTP transport when a
/// backend is configured.
pub fn open_store(config: &AppConfig) -> Result<BlackboardStore> {
    let storage: Arc<dyn KeyValueStore> = match &config.storage.path {
        Some(path) => Arc::new(FileKeyValueStore::new(path.clone())),
        None => Arc::new(FileKeyValueStore::open_default().context("Failed to locate data directory")?),
    };

    let transport: Arc<dyn SyncTransport> = match HttpSyncTransport::from_config(&config.remote) {
        Some(transport) => Arc::new(transport),
        None => {
            tracing::debug!("[CLI] No backend configured, running offline");
            Arc::new(OfflineTransport)
        }
    };

    Ok(BlackboardStore::new(config.storage.clone(), storage, transport))
}

/// Returns `text` joined by spaces, or all of stdin when `text` is empty.
pub fn text_or_stdin(text: Vec<String>) -> Result<String> {
    if !text.is_empty() {
        return Ok(text.join(" "));
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf.trim_end_matches('\n').to_string())
}

/// Returns `password`, or prompts for it on stderr and reads one line.
pub fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    io::stderr().flush().ok();
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Prints a remote outcome in green or red.
pub fn print_outcome(label: &str, success: bool, message: Option<&str>) {
    let message = message.unwrap_or(if success { "OK" } else { "Failed" });
    if success {
        println!("{} {}", format!("[{}]", label).green().bold(), message);
    } else {
        println!("{} {}", format!("[{}]", label).red().bold(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_text_is_joined() {
        let text = text_or_stdin(vec!["buy".into(), "chalk".into()]).unwrap();
        assert_eq!(text, "buy chalk");
    }

    #[test]
    fn test_explicit_password_skips_prompt() {
        assert_eq!(password_or_prompt(Some("pw".into())).unwrap(), "pw");
    }

    #[test]
    fn test_open_store_uses_configured_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        let mut config = AppConfig::default();
        config.storage.path = Some(path.clone());

        let mut store = open_store(&config).unwrap();
        store.update_content("log", "hello");
        assert!(path.exists());

        let reopened = open_store(&config).unwrap();
        assert_eq!(reopened.display_content("log"), "hello");
    }
}
