use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::theme::ThemeSettings;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("I/O error on theme file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("theme file {} is not valid: {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The ThemeStore keeps the current lyric theme in a JSON file.
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the theme file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored theme, or the default theme if nothing is stored yet
    pub fn load(&self) -> Result<ThemeSettings, ThemeError> {
        if !self.path.exists() {
            debug!("🎨 No theme at {}, using defaults", self.path.display());
            return Ok(ThemeSettings::default());
        }

        let json = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        ThemeSettings::from_json(&json).map_err(|e| ThemeError::Json {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Save the theme, creating parent directories as needed
    pub fn save(&self, theme: &ThemeSettings) -> Result<(), ThemeError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = theme.to_json().map_err(|e| ThemeError::Json {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;

        info!("💾 Theme saved to {}", self.path.display());
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> ThemeError {
        ThemeError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("theme.json"));

        assert_eq!(store.load().unwrap(), ThemeSettings::default());
    }

    #[test]
    fn test_save_creates_parents_and_loads_back() {
        let dir = tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("nested").join("theme.json"));
        let theme = ThemeSettings::default().with_background_image("easter/lilies.png");

        store.save(&theme).unwrap();

        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), theme);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("theme.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ThemeStore::new(&path).load().unwrap_err();

        assert!(matches!(err, ThemeError::Json { .. }));
    }
}
