use anyhow::{Context, Result};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub redmine: Option<RedmineConfig>,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize)]
pub struct RedmineConfig {
    pub url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LogConfig {
    /// One of off, error, warn, info, debug, trace.
    pub level: Option<String>,
    /// Log to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl LogConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        match &self.level {
            Some(level) => LevelFilter::from_str(level)
                .ok()
                .with_context(|| format!("Unknown log level '{level}'")),
            None => Ok(LevelFilter::Warn),
        }
    }
}

pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".redmine")
}

fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;
    Ok(config)
}
