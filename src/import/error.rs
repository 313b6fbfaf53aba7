use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can stop an image import
#[derive(Debug, Error)]
pub enum ImportError {
    /// Reading the source or touching the managed directory failed
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The byte copy into the managed directory failed
    #[error("failed to copy {} to {}: {}", .from.display(), .to.display(), .source)]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),

    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("{} is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),

    /// Identifier escapes the managed directory (absolute or `..`)
    #[error("invalid image identifier: {0:?}")]
    InvalidIdentifier(String),

    /// The background import task panicked or was cancelled
    #[error("import task failed: {0}")]
    Task(String),
}

impl ImportError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        ImportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True for failures that came from the filesystem
    pub fn is_io(&self) -> bool {
        matches!(self, ImportError::Io { .. } | ImportError::Copy { .. })
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
