//! State management module
//!
//! This module handles all application state, including:
//! - The lyric display theme (theme.rs)
//! - Persisting the theme between runs (store.rs)
//! - Listing images in the managed directory (library.rs)

pub mod library;
pub mod store;
pub mod theme;
