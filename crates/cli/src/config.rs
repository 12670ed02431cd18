//! Environment-driven configuration.

use std::path::PathBuf;

use stockpile_inventory::{DEFAULT_INVENTORY_PATH, DEFAULT_LOW_STOCK_THRESHOLD, Quantity};
use stockpile_observability::{LogFormat, UnknownLogFormat};
use thiserror::Error;

pub const INVENTORY_PATH_VAR: &str = "STOCKPILE_INVENTORY_PATH";
pub const LOW_STOCK_THRESHOLD_VAR: &str = "STOCKPILE_LOW_STOCK_THRESHOLD";
pub const LOG_FORMAT_VAR: &str = "STOCKPILE_LOG_FORMAT";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("STOCKPILE_LOW_STOCK_THRESHOLD must be a finite number, got `{0}`")]
    InvalidThreshold(String),

    #[error("STOCKPILE_LOG_FORMAT: {0}")]
    InvalidLogFormat(#[from] UnknownLogFormat),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub inventory_path: PathBuf,
    pub low_stock_threshold: Quantity,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            inventory_path: PathBuf::from(DEFAULT_INVENTORY_PATH),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source. Unset or blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(INVENTORY_PATH_VAR) {
            config.inventory_path = PathBuf::from(path);
        }
        if let Some(raw) = get(LOW_STOCK_THRESHOLD_VAR) {
            config.low_stock_threshold = parse_threshold(&raw)?;
        }
        if let Some(raw) = get(LOG_FORMAT_VAR) {
            config.log_format = raw.parse()?;
        }

        Ok(config)
    }
}

fn parse_threshold(raw: &str) -> Result<Quantity, ConfigError> {
    let trimmed = raw.trim();
    if let Ok(whole) = trimmed.parse::<i64>() {
        return Ok(Quantity::Whole(whole));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(|v| Quantity::fractional(v).ok())
        .ok_or_else(|| ConfigError::InvalidThreshold(raw.to_string()))
}
