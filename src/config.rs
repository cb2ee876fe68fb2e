//! Client configuration.
//!
//! Resolution order for the backend base URL:
//! 1. `CANTINA_API_URL` environment variable
//! 2. `config.json` in the platform config directory
//! 3. the compiled-in default
//!
//! The session file lives in the platform data directory unless overridden.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const APP_DIR: &str = "cantina";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the canteen backend, without a trailing slash.
    pub api_base_url: String,
    /// Where the persisted session file is kept.
    pub session_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            session_file: default_session_file(),
        }
    }
}

impl Config {
    /// Loads configuration from the environment and the optional config file.
    pub fn load() -> Result<Self> {
        let mut config = match config_file_path() {
            Some(path) if path.exists() => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("invalid config file {}", path.display()))?
            }
            _ => Config::default(),
        };

        if let Ok(url) = env::var("CANTINA_API_URL") {
            if !url.trim().is_empty() {
                config.api_base_url = url.trim().trim_end_matches('/').to_string();
            }
        }

        log::info!("using backend at {}", config.api_base_url);
        Ok(config)
    }

    /// Builds a config pointing at an explicit backend and session file.
    /// Used by tests and by anything driving the client programmatically.
    pub fn with_base_url(api_base_url: impl Into<String>, session_file: PathBuf) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            session_file,
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
}

fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("session.json")
}
