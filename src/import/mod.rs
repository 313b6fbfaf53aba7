//! Image import module
//!
//! This module handles:
//! - Copying picked images into the managed image directory
//! - Deriving the directory-relative identifier themes refer to
//! - Handing fresh identifiers to whoever owns the theme

pub mod error;
pub mod importer;
pub mod selection;

pub use error::{ImportError, Result};
pub use importer::{import_async, ImageImporter, ImportedImage};
pub use selection::ImageSelection;
