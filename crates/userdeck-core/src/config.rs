//! Application configuration management.
//!
//! This module handles loading the application configuration:
//! the users endpoint, default page size, request timeout, the id range used
//! for prev/next browsing and an optional favorites file location.
//!
//! Configuration is stored at `~/.config/userdeck/config.json`.

use std::num::NonZeroU32;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "userdeck";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Favorites file name inside the data directory
const FAVORITES_FILE: &str = "favorites.json";

/// Users endpoint of the public demo API
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api/users";

/// The demo API serves six users per page unless asked otherwise
const DEFAULT_PAGE_SIZE: u32 = 6;

/// The demo API has twelve users, ids 1 through 12
const DEFAULT_MAX_USER_ID: i64 = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub page_size: NonZeroU32,
    /// Per-request timeout; `None` leaves reqwest's default (no timeout)
    pub request_timeout_secs: Option<u64>,
    pub max_user_id: i64,
    pub favorites_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
            request_timeout_secs: None,
            max_user_id: DEFAULT_MAX_USER_ID,
            favorites_path: None,
        }
    }
}

impl Config {
    /// Load from the platform config directory
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Where favorites are kept: the configured path, else the platform data dir
    pub fn favorites_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.favorites_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME).join(FAVORITES_FILE))
    }

    /// Ids reachable through prev/next browsing
    pub fn user_id_range(&self) -> RangeInclusive<i64> {
        1..=self.max_user_id
    }
}
