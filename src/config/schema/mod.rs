use crate::sticker::StickerOptions;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_bot_name() -> String {
    "Sticker Bot".to_string()
}

fn default_bot_author() -> String {
    "stickerbot".to_string()
}

fn default_categories() -> Vec<String> {
    vec!["Fun".to_string()]
}

fn default_target_size() -> u32 {
    512
}

fn default_quality_start() -> u8 {
    80
}

fn default_size_budget_bytes() -> usize {
    1024 * 1024
}

fn default_general_secs() -> u64 {
    3
}

fn default_sticker_secs() -> u64 {
    5
}

fn default_scan_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub bot: BotIdentityConfig,
    pub sticker: StickerConfig,
    pub scan: ScanConfig,
    pub cooldowns: CooldownsConfig,
    pub channels: ChannelsConfig,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(64..=1024).contains(&self.sticker.target_size) {
            bail!(
                "sticker.target_size must be between 64 and 1024, got {}",
                self.sticker.target_size
            );
        }
        if !(1..=100).contains(&self.sticker.quality_start) {
            bail!(
                "sticker.quality_start must be between 1 and 100, got {}",
                self.sticker.quality_start
            );
        }
        if self.sticker.size_budget_bytes < 10 * 1024 {
            bail!(
                "sticker.size_budget_bytes must be at least 10KB, got {}",
                self.sticker.size_budget_bytes
            );
        }
        if self.bot.name.is_empty() {
            bail!("bot.name must not be empty");
        }
        Ok(())
    }
}

/// Identity stamped into outbound sticker metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotIdentityConfig {
    #[serde(default = "default_bot_name")]
    pub name: String,
    #[serde(default = "default_bot_author")]
    pub author: String,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl Default for BotIdentityConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            author: default_bot_author(),
            categories: default_categories(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StickerConfig {
    #[serde(default = "default_target_size")]
    pub target_size: u32,
    #[serde(default = "default_quality_start")]
    pub quality_start: u8,
    #[serde(default = "default_size_budget_bytes")]
    pub size_budget_bytes: usize,
}

impl StickerConfig {
    /// Per-request options: config defaults plus the command's
    /// transparency flag.
    pub fn options(&self, transparent_background: bool) -> StickerOptions {
        StickerOptions {
            target_size: self.target_size,
            transparent_background,
            quality_start: self.quality_start,
            size_budget_bytes: self.size_budget_bytes,
        }
    }
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            target_size: default_target_size(),
            quality_start: default_quality_start(),
            size_budget_bytes: default_size_budget_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Minimum interval per user between invocations of rate-limited actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownsConfig {
    #[serde(default = "default_general_secs")]
    pub general_secs: u64,
    #[serde(default = "default_sticker_secs")]
    pub sticker_secs: u64,
    #[serde(default = "default_scan_secs")]
    pub scan_secs: u64,
}

impl Default for CooldownsConfig {
    fn default() -> Self {
        Self {
            general_secs: default_general_secs(),
            sticker_secs: default_sticker_secs(),
            scan_secs: default_scan_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChannelsConfig {
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[cfg(test)]
mod tests;
