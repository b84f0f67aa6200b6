use anyhow::{Context, Result};
use blackboard_core::config::AppConfig;
use blackboard_infrastructure::ConfigService;

use super::utils::print_outcome;

pub fn path(service: &ConfigService) {
    println!("{}", service.path().display());
}

pub fn show(config: &AppConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render config")?;
    print!("{}", rendered);
    Ok(())
}

pub fn init(service: &ConfigService) -> Result<()> {
    if service.path().exists() {
        let message = format!("Config already exists at {}", service.path().display());
        print_outcome("config", true, Some(&message));
        return Ok(());
    }
    service.save(&AppConfig::default())?;
    let message = format!("Wrote default config to {}", service.path().display());
    print_outcome("config", true, Some(&message));
    Ok(())
}
