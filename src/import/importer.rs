//! Copies picked images into the managed image directory.
//!
//! Themes never store absolute paths. They store an identifier relative to
//! the managed directory, so the whole directory can move with the app.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::task;
use tracing::{debug, info, warn};

use super::error::{ImportError, Result};

/// Result of a successful import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedImage {
    /// Path relative to the managed directory, always `/`-separated
    pub identifier: String,
    /// Location of the image inside the managed directory
    pub path: PathBuf,
    /// False when the file was already in place and nothing was written
    pub copied: bool,
}

/// Imports images into one managed directory
#[derive(Debug, Clone)]
pub struct ImageImporter {
    managed_dir: PathBuf,
}

impl ImageImporter {
    /// Create an importer, creating the managed directory if it is missing
    pub fn open(managed_dir: impl Into<PathBuf>) -> Result<Self> {
        let managed_dir = managed_dir.into();
        fs::create_dir_all(&managed_dir).map_err(|e| ImportError::io(&managed_dir, e))?;

        debug!("📁 Managed image directory: {}", managed_dir.display());
        Ok(Self { managed_dir })
    }

    /// Get the managed directory this importer writes into
    pub fn managed_dir(&self) -> &Path {
        &self.managed_dir
    }

    /// Make `source` available inside the managed directory.
    ///
    /// Files already under the directory (compared after resolving symlinks
    /// and `..`) are left where they are. Anything else is copied to
    /// `<managed>/<file name>`, replacing a same-named file if one exists.
    pub fn import(&self, source: &Path) -> Result<ImportedImage> {
        let file_name = source
            .file_name()
            .ok_or_else(|| ImportError::NoFileName(source.to_path_buf()))?;

        let root = fs::canonicalize(&self.managed_dir)
            .map_err(|e| ImportError::io(&self.managed_dir, e))?;
        let canonical_source =
            fs::canonicalize(source).map_err(|e| ImportError::io(source, e))?;

        if !canonical_source.is_file() {
            return Err(ImportError::NotAFile(source.to_path_buf()));
        }

        // Component-wise: /app/img2/x.png is not under /app/img
        if let Ok(relative) = canonical_source.strip_prefix(&root) {
            let identifier = to_identifier(relative)?;
            debug!("📌 {} is already managed as {}", source.display(), identifier);

            return Ok(ImportedImage {
                identifier,
                path: self.managed_dir.join(relative),
                copied: false,
            });
        }

        let identifier = to_identifier(Path::new(file_name))?;
        let target = self.managed_dir.join(file_name);

        // Hard or symbolic links to the source are already in place
        let copied = if same_file::is_same_file(&canonical_source, &target).unwrap_or(false) {
            debug!("📌 {} already links to {}", target.display(), source.display());
            false
        } else {
            if target.symlink_metadata().is_ok() {
                warn!("⚠️  Replacing existing image {}", target.display());
            }

            let bytes = copy_atomically(&canonical_source, &target, &self.managed_dir)
                .map_err(|e| ImportError::Copy {
                    from: source.to_path_buf(),
                    to: target.clone(),
                    source: e,
                })?;

            info!("📥 Imported {} ({} bytes) as {}", source.display(), bytes, identifier);
            true
        };

        Ok(ImportedImage {
            identifier,
            path: target,
            copied,
        })
    }

    /// Turn an identifier back into a path inside the managed directory
    pub fn resolve(&self, identifier: &str) -> Result<PathBuf> {
        let relative = Path::new(identifier);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if identifier.is_empty() || escapes {
            return Err(ImportError::InvalidIdentifier(identifier.to_string()));
        }

        Ok(self.managed_dir.join(relative))
    }
}

/// Run an import on the blocking pool so the caller's thread stays responsive
pub async fn import_async(importer: ImageImporter, source: PathBuf) -> Result<ImportedImage> {
    task::spawn_blocking(move || importer.import(&source))
        .await
        .map_err(|e| ImportError::Task(e.to_string()))?
}

/// Join the components of a relative path with `/`
pub(crate) fn to_identifier(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();

    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| ImportError::NonUtf8Path(relative.to_path_buf()))?;
                parts.push(part);
            }
            Component::CurDir => {}
            _ => {
                return Err(ImportError::InvalidIdentifier(
                    relative.to_string_lossy().into_owned(),
                ))
            }
        }
    }

    if parts.is_empty() {
        return Err(ImportError::InvalidIdentifier(String::new()));
    }

    Ok(parts.join("/"))
}

/// Copy into a temp file in `dir`, then rename it over `target`.
///
/// The rename replaces the entry at `target` itself, so links there are
/// never written through, and a failed copy leaves `target` as it was.
fn copy_atomically(source: &Path, target: &Path, dir: &Path) -> io::Result<u64> {
    let mut reader = File::open(source)?;
    let permissions = reader.metadata()?.permissions();

    let mut temp = NamedTempFile::new_in(dir)?;
    let bytes = io::copy(&mut reader, temp.as_file_mut())?;
    temp.as_file().set_permissions(permissions)?;
    temp.persist(target).map_err(|e| e.error)?;

    Ok(bytes)
}
