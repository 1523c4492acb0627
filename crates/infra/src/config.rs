//! Store configuration loaded from the environment.
//!
//! | variable | values | default |
//! |---|---|---|
//! | `STOCKROOM_STORE` | `memory`, `json`, `text` | `json` |
//! | `STOCKROOM_DATA_FILE` | path | `inventario.json` / `inventario.txt` |

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::file_store::FileFlavor;

pub const STORE_ENV: &str = "STOCKROOM_STORE";
pub const DATA_FILE_ENV: &str = "STOCKROOM_DATA_FILE";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown store backend '{0}' (expected memory, json or text)")]
    UnknownBackend(String),

    #[error("STOCKROOM_DATA_FILE is set but the memory backend has no file")]
    PathWithoutFile,

    #[error("STOCKROOM_DATA_FILE is empty")]
    EmptyPath,
}

/// Which persistence strategy backs the inventory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StoreBackend {
    Memory,
    #[default]
    Json,
    Text,
}

impl StoreBackend {
    pub fn file_flavor(self) -> Option<FileFlavor> {
        match self {
            StoreBackend::Memory => None,
            StoreBackend::Json => Some(FileFlavor::Json),
            StoreBackend::Text => Some(FileFlavor::Text),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "json" => Ok(StoreBackend::Json),
            "text" | "txt" => Ok(StoreBackend::Text),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Resolved store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Overrides the flavour's default file name. File backends only.
    pub data_file: Option<PathBuf>,
}

impl StoreConfig {
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            data_file: None,
        }
    }

    pub fn file(flavor: FileFlavor, path: impl Into<PathBuf>) -> Self {
        let backend = match flavor {
            FileFlavor::Json => StoreBackend::Json,
            FileFlavor::Text => StoreBackend::Text,
        };
        Self {
            backend,
            data_file: Some(path.into()),
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup(STORE_ENV) {
            Some(raw) => raw.parse()?,
            None => {
                tracing::debug!("{STORE_ENV} not set; using json store");
                StoreBackend::default()
            }
        };

        let data_file = match lookup(DATA_FILE_ENV) {
            Some(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptyPath),
            Some(raw) => Some(PathBuf::from(raw)),
            None => None,
        };

        if backend == StoreBackend::Memory && data_file.is_some() {
            return Err(ConfigError::PathWithoutFile);
        }

        Ok(Self { backend, data_file })
    }

    /// Path of the backing file, if the backend has one.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        let flavor = self.backend.file_flavor()?;
        Some(
            self.data_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(flavor.default_file_name())),
        )
    }
}
