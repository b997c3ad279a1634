use crate::config::Config;
use crate::utils::{atomic_write, get_bot_home};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_bot_home()?.join("config.json"))
}

/// Load the config from disk, falling back to defaults when no file
/// exists. Parsing or validation failures abort startup with a clear
/// diagnostic — a half-understood config is worse than none.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let default_path = get_config_path().unwrap_or_else(|_| PathBuf::from("config.json"));
    let path = config_path.unwrap_or(default_path.as_path());

    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON from {}", path.display()))?;
        config
            .validate()
            .with_context(|| "Configuration validation failed")?;
        return Ok(config);
    }

    let config = Config::default();
    config
        .validate()
        .with_context(|| "Default configuration validation failed")?;
    Ok(config)
}

pub fn save_config(config: &Config, config_path: Option<&Path>) -> Result<()> {
    let default_path = get_config_path().unwrap_or_else(|_| PathBuf::from("config.json"));
    let path = config_path.unwrap_or(default_path.as_path());

    let content = serde_json::to_string_pretty(config)?;
    atomic_write(path, &content)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
}
