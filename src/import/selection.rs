//! The "pick a background image" action, without the button.
//!
//! The managed directory and the theme update are passed in explicitly.
//! A failed import only logs: the previous location and the theme stay as
//! they were.

use std::path::{Path, PathBuf};
use tracing::warn;

use super::error::Result;
use super::importer::{import_async, ImageImporter, ImportedImage};

/// Remembers the last successfully imported image location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSelection {
    image_location: Option<String>,
}

impl ImageSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a location that is already in use (e.g. the saved theme)
    pub fn with_location(location: Option<String>) -> Self {
        Self {
            image_location: location,
        }
    }

    /// Get the location of the selected image
    pub fn image_location(&self) -> Option<&str> {
        self.image_location.as_deref()
    }

    /// Import `source` and hand its identifier to `on_imported`
    pub fn select<F>(
        &mut self,
        importer: &ImageImporter,
        source: &Path,
        on_imported: F,
    ) -> Result<ImportedImage>
    where
        F: FnOnce(&str),
    {
        let result = importer.import(source);
        self.finish(result, source, on_imported)
    }

    /// Same as [`select`](Self::select), with the copy on the blocking pool
    pub async fn select_async<F>(
        &mut self,
        importer: &ImageImporter,
        source: PathBuf,
        on_imported: F,
    ) -> Result<ImportedImage>
    where
        F: FnOnce(&str),
    {
        let result = import_async(importer.clone(), source.clone()).await;
        self.finish(result, &source, on_imported)
    }

    fn finish<F>(
        &mut self,
        result: Result<ImportedImage>,
        source: &Path,
        on_imported: F,
    ) -> Result<ImportedImage>
    where
        F: FnOnce(&str),
    {
        match result {
            Ok(imported) => {
                on_imported(&imported.identifier);
                self.image_location = Some(imported.identifier.clone());
                Ok(imported)
            }
            Err(err) => {
                warn!("⚠️  Could not import {}: {}", source.display(), err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_select_updates_location_and_calls_back() {
        let home = tempdir().unwrap();
        let app = tempdir().unwrap();
        let source = home.path().join("cross.png");
        fs::write(&source, "img").unwrap();

        let importer = ImageImporter::open(app.path()).unwrap();
        let mut selection = ImageSelection::new();
        let mut received = Vec::new();

        let imported = selection
            .select(&importer, &source, |location| received.push(location.to_string()))
            .unwrap();

        assert_eq!(imported.identifier, "cross.png");
        assert_eq!(received, vec!["cross.png".to_string()]);
        assert_eq!(selection.image_location(), Some("cross.png"));
    }

    #[test]
    fn test_failed_select_keeps_previous_state() {
        let app = tempdir().unwrap();
        let importer = ImageImporter::open(app.path()).unwrap();
        let mut selection = ImageSelection::with_location(Some("old.png".to_string()));
        let mut called = false;

        let result = selection.select(&importer, &app.path().join("gone.png"), |_| called = true);

        assert!(result.is_err());
        assert!(!called);
        assert_eq!(selection.image_location(), Some("old.png"));
    }

    #[tokio::test]
    async fn test_select_async_calls_back_once() {
        let home = tempdir().unwrap();
        let app = tempdir().unwrap();
        let source = home.path().join("dove.jpg");
        fs::write(&source, "img").unwrap();

        let importer = ImageImporter::open(app.path()).unwrap();
        let mut selection = ImageSelection::new();
        let mut calls = 0;

        selection
            .select_async(&importer, source, |_| calls += 1)
            .await
            .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(selection.image_location(), Some("dove.jpg"));
    }
}
