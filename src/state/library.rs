use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::import::importer::to_identifier;

/// File extensions offered as theme backgrounds
const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff"];

/// Represents a single image in the managed directory
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedImage {
    /// Identifier a theme would store (e.g., "easter/lilies.png")
    pub identifier: String,
    /// Full path to the image file
    pub path: PathBuf,
    /// Pixel size, None if the header could not be read
    pub dimensions: Option<(u32, u32)>,
}

/// Check if a path looks like a supported image, by extension
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// The Library lists the background images available in the managed directory.
pub struct Library {
    root: PathBuf,
}

impl Library {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the managed directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get all images, sorted by identifier
    pub fn images(&self) -> Vec<ManagedImage> {
        let mut images: Vec<ManagedImage> = self
            .entries()
            .map(|(identifier, path)| ManagedImage {
                dimensions: image::image_dimensions(&path).ok(),
                identifier,
                path,
            })
            .collect();

        images.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        images
    }

    /// Get a count of images in the library, without reading any headers
    pub fn image_count(&self) -> usize {
        self.entries().count()
    }

    /// Walk the directory tree recursively, yielding (identifier, path)
    fn entries(&self) -> impl Iterator<Item = (String, PathBuf)> + '_ {
        WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file() && is_supported_image(entry.path()))
            .filter_map(move |entry| {
                let path = entry.into_path();
                let relative = path.strip_prefix(&self.root).ok()?;

                match to_identifier(relative) {
                    Ok(identifier) => Some((identifier, path)),
                    Err(e) => {
                        debug!("Skipping {}: {}", path.display(), e);
                        None
                    }
                }
            })
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("root", &self.root)
            .finish()
    }
}
