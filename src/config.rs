//! Loads user settings from a `settings.toml` file.
//!
//! # Path Resolution Order
//!
//! The settings file is looked up in:
//! 1. `--config <file>` on the command line (via [`load_from_path`])
//! 2. `BACKDROP_CONFIG_DIR` environment variable (if set and non-empty)
//! 3. Platform config directory (`~/.config/backdrop/` on Linux)
//!
//! A missing file means defaults; an unparsable one is logged and ignored.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "backdrop";

/// Default name of the managed image directory
const IMAGE_DIR: &str = "img";

/// Default name of the stored theme
const THEME_FILE: &str = "theme.json";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "BACKDROP_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not determine the user data directory; set image_dir and theme_file in settings.toml")]
    NoDataDir,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Managed image directory
    #[serde(default)]
    pub image_dir: Option<PathBuf>,
    /// Where the current theme is stored
    #[serde(default)]
    pub theme_file: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is not set (e.g. "debug")
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Managed image directory, defaulting to `<data dir>/backdrop/img`
    pub fn image_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.image_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_path(IMAGE_DIR),
        }
    }

    /// Theme file, defaulting to `<data dir>/backdrop/theme.json`
    pub fn theme_file(&self) -> Result<PathBuf, ConfigError> {
        match &self.theme_file {
            Some(file) => Ok(file.clone()),
            None => default_data_path(THEME_FILE),
        }
    }
}

fn default_data_path(name: &str) -> Result<PathBuf, ConfigError> {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .ok_or(ConfigError::NoDataDir)?;

    path.push(APP_NAME);
    path.push(name);
    Ok(path)
}

/// Default location of `settings.toml`
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path).join(CONFIG_FILE));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config, ConfigError> {
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(toml::from_str(&content).unwrap_or_else(|e| {
        warn!("⚠️  Ignoring invalid settings in {}: {}", path.display(), e);
        Config::default()
    }))
}
