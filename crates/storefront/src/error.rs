//! Unified error handling.
//!
//! Provides a unified `AppError` type for the storefront page. Cart lookups
//! that miss are not errors; what remains are storage writes, template
//! rendering, configuration, and malformed input at the edges.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The durable store could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The cart could not be encoded for storage.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input from the user or command line was malformed.
    #[error("Bad input: {0}")]
    BadInput(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<parrot_core::PriceError> for AppError {
    fn from(err: parrot_core::PriceError) -> Self {
        Self::BadInput(err.to_string())
    }
}

impl From<parrot_core::ProductIdError> for AppError {
    fn from(err: parrot_core::ProductIdError) -> Self {
        Self::BadInput(err.to_string())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
