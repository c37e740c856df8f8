//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional.
//! - `PARROT_STORAGE` - `file` (default) or `memory`
//! - `PARROT_STORAGE_DIR` - Directory for the file store (default: `.parrot`)
//! - `PARROT_CHAT_REPLY_DELAY_MS` - Delay before the simulated chat reply (default: 1500)
//! - `PARROT_LOG_FORMAT` - `pretty` (default) or `json`

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

const DEFAULT_STORAGE_DIR: &str = ".parrot";
const DEFAULT_CHAT_REPLY_DELAY_MS: u64 = 1500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the page keeps its durable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// `local_storage.json` inside the given directory.
    File(PathBuf),
    /// Nothing survives the process.
    Memory,
}

impl StorageBackend {
    /// Open the configured store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file store cannot be opened.
    pub fn open(&self) -> Result<Box<dyn KeyValueStore>, StorageError> {
        match self {
            Self::File(dir) => Ok(Box::new(FileStore::open(dir)?)),
            Self::Memory => Ok(Box::new(MemoryStore::new())),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Durable store backend
    pub storage: StorageBackend,
    /// Delay before the simulated chat reply arrives
    pub chat_reply_delay: Duration,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::File(PathBuf::from(DEFAULT_STORAGE_DIR)),
            chat_reply_delay: Duration::from_millis(DEFAULT_CHAT_REPLY_DELAY_MS),
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_dir = lookup("PARROT_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let storage = match lookup("PARROT_STORAGE").as_deref().map(str::trim) {
            None | Some("file") => StorageBackend::File(storage_dir),
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "PARROT_STORAGE".to_string(),
                    format!("expected `file` or `memory`, got `{other}`"),
                ));
            }
        };

        let chat_reply_delay = lookup("PARROT_CHAT_REPLY_DELAY_MS")
            .map_or(Ok(DEFAULT_CHAT_REPLY_DELAY_MS), |value| value.trim().parse::<u64>())
            .map(Duration::from_millis)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PARROT_CHAT_REPLY_DELAY_MS".to_string(), e.to_string())
            })?;

        let log_format = lookup("PARROT_LOG_FORMAT")
            .map_or(Ok(LogFormat::default()), |value| value.parse::<LogFormat>())
            .map_err(|e| ConfigError::InvalidEnvVar("PARROT_LOG_FORMAT".to_string(), e))?;

        Ok(Self {
            storage,
            chat_reply_delay,
            log_format,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.storage, StorageBackend::File(PathBuf::from(".parrot")));
        assert_eq!(config.chat_reply_delay, Duration::from_millis(1500));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("PARROT_STORAGE", "memory"),
            ("PARROT_CHAT_REPLY_DELAY_MS", "20"),
            ("PARROT_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.chat_reply_delay, Duration::from_millis(20));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_storage_dir() {
        let config =
            StorefrontConfig::from_lookup(lookup_from(&[("PARROT_STORAGE_DIR", "/tmp/shop")]))
                .unwrap();
        assert_eq!(config.storage, StorageBackend::File(PathBuf::from("/tmp/shop")));
    }

    #[test]
    fn test_invalid_values() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[("PARROT_STORAGE", "s3")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "PARROT_STORAGE"));

        let err = StorefrontConfig::from_lookup(lookup_from(&[(
            "PARROT_CHAT_REPLY_DELAY_MS",
            "soon",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("PARROT_CHAT_REPLY_DELAY_MS"));

        assert!(
            StorefrontConfig::from_lookup(lookup_from(&[("PARROT_LOG_FORMAT", "xml")])).is_err()
        );
    }

    #[test]
    fn test_memory_backend_opens() {
        let mut store = StorageBackend::Memory.open().unwrap();
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
