//! Configuration management for MovieScope
//!
//! Handles config file loading/saving and API key lookup.
//! Config is stored at ~/.config/moviescope/config.toml

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::tmdb::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};
use crate::controller::DEFAULT_REDIRECT_DELAY;

/// Environment variable checked before the config file for the API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB API read access token
    pub tmdb_api_key: Option<String>,
    /// TMDB API root (override for proxies and tests)
    pub api_base_url: Option<String>,
    /// TMDB image CDN root
    pub image_base_url: Option<String>,
    /// Delay before an invalid movie ID redirects home
    pub redirect_delay_ms: Option<u64>,
    /// Default tracing filter, e.g. "info" or "moviescope=debug"
    pub log_level: Option<String>,
}

impl Config {
    /// Directory holding the config file and logs (~/.config/moviescope)
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("moviescope"))
    }

    /// Get config file path (~/.config/moviescope/config.toml)
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|p| p.join("config.toml"))
    }

    /// Load config from the default location.
    ///
    /// A missing file gives defaults. An unreadable or malformed file also
    /// gives defaults, along with the error so the caller can report it once
    /// logging is up.
    pub fn load() -> (Self, Option<anyhow::Error>) {
        match Self::path() {
            Some(path) => Self::load_or_default(&path),
            None => (Self::default(), None),
        }
    }

    pub fn load_or_default(path: &Path) -> (Self, Option<anyhow::Error>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Get TMDB API key with fallback chain:
    /// 1. Environment variable TMDB_API_KEY
    /// 2. Key from config file
    pub fn tmdb_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.tmdb_api_key.clone())
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn image_base_url(&self) -> &str {
        self.image_base_url.as_deref().unwrap_or(DEFAULT_IMAGE_BASE_URL)
    }

    pub fn redirect_delay(&self) -> Duration {
        self.redirect_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REDIRECT_DELAY)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }
}
