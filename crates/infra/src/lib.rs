//! Infrastructure layer: file-backed stores, configuration and wiring.

pub mod config;
pub mod file_store;


use anyhow::Context;
use tracing::info;

use stockroom_inventory::{InMemoryProductStore, Inventory, ProductStore};

pub use config::{ConfigError, StoreBackend, StoreConfig};
pub use file_store::{FileFlavor, JsonFileStore};

/// Inventory whose storage strategy is chosen at runtime.
pub type DynInventory = Inventory<Box<dyn ProductStore>>;

/// Build the storage strategy described by `config`.
pub fn build_store(config: &StoreConfig) -> Box<dyn ProductStore> {
    match (config.backend.file_flavor(), config.resolved_path()) {
        (Some(flavor), Some(path)) => Box::new(JsonFileStore::new(path, flavor)),
        _ => Box::new(InMemoryProductStore::new()),
    }
}

/// Open an inventory over the store described by `config`.
///
/// Loading never fails; see [`Inventory::open`].
pub fn open_inventory(config: &StoreConfig) -> DynInventory {
    let store = build_store(config);
    info!(store = %store.describe(), "opening inventory");
    Inventory::open(store)
}

/// Read [`StoreConfig`] from the environment and open the inventory it describes.
pub fn open_inventory_from_env() -> anyhow::Result<DynInventory> {
    let config = StoreConfig::from_env().context("invalid store configuration")?;
    Ok(open_inventory(&config))
}
