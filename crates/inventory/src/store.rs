//! Storage strategy boundary for the inventory.
//!
//! An inventory loads its full product set once and rewrites it after every
//! mutation. Stores only ever see [`ProductRecord`]s.

use std::path::PathBuf;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::product::ProductRecord;

/// Store operation error.
///
/// These are **infrastructure errors** (files, encoding) as opposed to domain
/// errors (validation, unknown ids).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written (permissions, missing
    /// directory, disk full).
    #[error("persistence unavailable at {path:?}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but its contents are not a product list.
    #[error("corrupt product file {path:?}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Products could not be encoded.
    #[error("failed to encode products: {0}")]
    Encode(String),

    /// The store itself is in an unusable state.
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unavailable {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Whole-collection persistence strategy.
///
/// `load` is called once when an inventory opens; `save` receives the complete
/// product set after every successful mutation and must replace whatever was
/// stored before. A store that has nothing stored yet returns an empty list.
pub trait ProductStore {
    fn load(&self) -> Result<Vec<ProductRecord>, StoreError>;

    fn save(&self, records: &[ProductRecord]) -> Result<(), StoreError>;

    /// Short human-readable description used in log events.
    fn describe(&self) -> String;
}

impl<S> ProductStore for Box<S>
where
    S: ProductStore + ?Sized,
{
    fn load(&self) -> Result<Vec<ProductRecord>, StoreError> {
        (**self).load()
    }

    fn save(&self, records: &[ProductRecord]) -> Result<(), StoreError> {
        (**self).save(records)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S> ProductStore for &S
where
    S: ProductStore + ?Sized,
{
    fn load(&self) -> Result<Vec<ProductRecord>, StoreError> {
        (**self).load()
    }

    fn save(&self, records: &[ProductRecord]) -> Result<(), StoreError> {
        (**self).save(records)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// In-memory store for the memory-only variant and for tests.
///
/// Keeps the last saved snapshot; nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    snapshot: RwLock<Vec<ProductRecord>>,
    saves: AtomicU64,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store as if `records` had been saved earlier.
    pub fn with_records(records: Vec<ProductRecord>) -> Self {
        Self {
            snapshot: RwLock::new(records),
            saves: AtomicU64::new(0),
        }
    }

    /// Copy of the most recently saved snapshot.
    pub fn snapshot(&self) -> Vec<ProductRecord> {
        match self.snapshot.read() {
            Ok(records) => records.clone(),
            Err(_) => vec![],
        }
    }

    /// Number of successful saves since construction.
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::Relaxed)
    }
}

impl ProductStore for InMemoryProductStore {
    fn load(&self) -> Result<Vec<ProductRecord>, StoreError> {
        let records = self
            .snapshot
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(records.clone())
    }

    fn save(&self, records: &[ProductRecord]) -> Result<(), StoreError> {
        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        *snapshot = records.to_vec();
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
