//! Background image import for lyric display themes.
//!
//! - `import` copies picked images into the managed image directory
//! - `state` holds the display theme and the image library
//! - `config` resolves where everything lives on disk

pub mod config;
pub mod error;
pub mod import;
pub mod state;

pub use error::{Error, Result};
