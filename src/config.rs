use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Minutes between synchronization ticks.
    pub interval: u64,
    #[serde(default)]
    pub debug: bool,
    /// Optional file that mirrors everything logged to stdout.
    pub log: Option<PathBuf>,
    pub nextcloud: NextcloudConfig,
    pub trello: TrelloConfig,
    #[serde(default)]
    pub sync: Vec<SyncGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NextcloudConfig {
    /// Base URL of the Deck API, e.g. `https://host/index.php/apps/deck/api/v1.0`.
    pub api: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrelloConfig {
    pub key: String,
    pub token: String,
}

/// One reconciliation unit: a Deck stack mirrored into a Trello list.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub nextcloud: SourceLocation,
    pub trello: TargetLocation,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceLocation {
    pub board: i64,
    pub stack: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetLocation {
    /// Kept for operator reference; reconciliation only addresses the list.
    pub board: String,
    pub list: String,
}

fn config_path() -> PathBuf {
    let local = PathBuf::from("config.toml");
    if local.exists() {
        return local;
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".decksync")
        .join("config.toml")
}

pub fn load_config() -> Result<Config> {
    load_from(&config_path())
}

pub fn load_from(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    if config.interval == 0 {
        bail!("interval must be at least 1 minute");
    }
    Ok(config)
}
