use thiserror::Error;

use crate::config::ConfigError;
use crate::import::ImportError;
use crate::state::store::ThemeError;

/// Top-level error for the command line host
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error("cannot render theme: {0}")]
    Render(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
