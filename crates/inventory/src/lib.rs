//! Inventory domain module.
//!
//! This crate contains the business rules for products and the inventory that
//! owns them. Persistence is reached only through the [`ProductStore`] trait;
//! file-backed stores live in `stockroom-infra`.

pub mod inventory;
pub mod product;
pub mod store;

pub use inventory::Inventory;
pub use product::{Product, ProductRecord};
pub use store::{InMemoryProductStore, ProductStore, StoreError};
