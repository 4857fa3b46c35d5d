//! Application configuration management.
//!
//! This module handles loading the application configuration, which
//! covers the API base URL and an optional override for the persistent
//! store location. The config file is read-only from the app's side;
//! users edit it by hand.
//!
//! Configuration is stored at `~/.config/mortydex/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

/// Application name used for config/store directory paths
const APP_NAME: &str = "mortydex";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default base URL for the Rick and Morty API
const DEFAULT_API_BASE_URL: &str = "https://rickandmortyapi.com/api";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub store_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Base URL for catalog requests, with the MORTYDEX_API_URL environment
    /// variable taking precedence over the config file.
    pub fn api_base_url(&self) -> String {
        std::env::var("MORTYDEX_API_URL")
            .ok()
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    /// Directory holding the persistent key-value store.
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}
