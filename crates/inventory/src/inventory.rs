//! The inventory: product ownership, id assignment and write-through persistence.

use std::collections::BTreeMap;

use tracing::{debug, error, info, warn};

use stockroom_core::{DomainError, DomainResult, ProductId};

use crate::product::{Product, ProductRecord, validate_name, validate_price, validate_quantity};
use crate::store::{InMemoryProductStore, ProductStore, StoreError};

/// Collection of products backed by a [`ProductStore`].
///
/// ## Ids
///
/// Ids come from a counter that only moves forward. Removing a product never
/// frees its id for the rest of the process. On open, the counter resumes from
/// the highest id found in the store.
///
/// ## Persistence
///
/// Every successful mutation rewrites the whole store. A failed save is logged
/// and the in-memory state stays authoritative; the next successful save
/// catches the store up. Failed mutations never touch the store.
///
/// ## Ordering
///
/// Products are kept in id order. Ids are issued in insertion order, so this is
/// also insertion order.
#[derive(Debug)]
pub struct Inventory<S> {
    products: BTreeMap<ProductId, Product>,
    last_id: ProductId,
    store: S,
}

impl Inventory<InMemoryProductStore> {
    /// An inventory that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::open(InMemoryProductStore::new())
    }
}

impl<S: ProductStore> Inventory<S> {
    /// Open an inventory, loading whatever the store holds.
    ///
    /// Never fails: an unreadable or corrupt store is logged and the inventory
    /// starts empty. The store is not written until the first mutation.
    pub fn open(store: S) -> Self {
        let mut inventory = Self {
            products: BTreeMap::new(),
            last_id: ProductId::new(0),
            store,
        };

        match inventory.store.load() {
            Ok(records) => inventory.restore(records),
            Err(err @ StoreError::Corrupt { .. }) => {
                warn!(store = %inventory.store.describe(), error = %err, "ignoring unreadable product file; starting empty");
            }
            Err(err) => {
                error!(store = %inventory.store.describe(), error = %err, "product store unavailable; starting empty");
            }
        }

        inventory
    }

    fn restore(&mut self, records: Vec<ProductRecord>) {
        let total = records.len();
        for record in records {
            let id = record.id;
            // Skipped records still reserve their id.
            if id > self.last_id {
                self.last_id = id;
            }

            if self.products.contains_key(&id) {
                warn!(%id, "skipping duplicate product record");
                continue;
            }

            match Product::from_record(record) {
                Ok(product) => {
                    self.products.insert(id, product);
                }
                Err(err) => {
                    warn!(%id, error = %err, "skipping invalid product record");
                }
            }
        }

        info!(
            store = %self.store.describe(),
            loaded = self.products.len(),
            skipped = total - self.products.len(),
            last_id = %self.last_id,
            "inventory loaded"
        );
    }

    /// Add a product and return its newly issued id.
    ///
    /// Checks run in order name, quantity, price; the first failure is returned
    /// and no id is consumed. Fails with `IdsExhausted` once `u64::MAX` has been
    /// issued or loaded.
    pub fn add_product(
        &mut self,
        name: impl Into<String>,
        quantity: i64,
        price: f64,
    ) -> DomainResult<ProductId> {
        let name = name.into();
        validate_name(&name)?;
        validate_quantity(quantity)?;
        validate_price(price)?;

        let id = self
            .last_id
            .next()
            .ok_or(DomainError::IdsExhausted(self.last_id))?;
        self.last_id = id;
        self.products.insert(id, Product::new(id, name, quantity, price));
        debug!(%id, "product added");

        self.persist("add_product");
        Ok(id)
    }

    /// Remove a product. Returns `false` when `id` is unknown.
    pub fn remove_product(&mut self, id: ProductId) -> bool {
        self.try_remove_product(id).is_ok()
    }

    /// Remove a product, handing it back to the caller.
    pub fn try_remove_product(&mut self, id: ProductId) -> DomainResult<Product> {
        let removed = self
            .products
            .remove(&id)
            .ok_or(DomainError::not_found(id))?;
        debug!(%id, "product removed");

        self.persist("remove_product");
        Ok(removed)
    }

    /// Set the quantity on hand. Returns `false` when `id` is unknown or the
    /// quantity is negative.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        self.try_update_quantity(id, quantity).is_ok()
    }

    pub fn try_update_quantity(&mut self, id: ProductId, quantity: i64) -> DomainResult<()> {
        let product = self.product_mut(id)?;
        validate_quantity(quantity)?;
        product.set_quantity(quantity)?;
        debug!(%id, quantity, "quantity updated");

        self.persist("update_quantity");
        Ok(())
    }

    /// Set the unit price. Returns `false` when `id` is unknown or the price is
    /// not strictly positive.
    pub fn update_price(&mut self, id: ProductId, price: f64) -> bool {
        self.try_update_price(id, price).is_ok()
    }

    pub fn try_update_price(&mut self, id: ProductId, price: f64) -> DomainResult<()> {
        let product = self.product_mut(id)?;
        validate_price(price)?;
        product.set_price(price)?;
        debug!(%id, price, "price updated");

        self.persist("update_price");
        Ok(())
    }

    /// Products whose name contains `query`, ignoring case, in storage order.
    pub fn find_by_name(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .values()
            .filter(|p| p.name_contains_lowercase(&needle))
            .collect()
    }

    /// All products in storage order.
    pub fn list_all(&self) -> Vec<&Product> {
        self.products.values().collect()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Highest id issued or loaded so far (`0` when none).
    pub fn last_id(&self) -> ProductId {
        self.last_id
    }

    /// Sum of `quantity * price` over every product.
    pub fn total_value(&self) -> f64 {
        self.products.values().map(Product::stock_value).sum()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write the full product set to the store and report the outcome.
    pub fn save(&self) -> Result<(), StoreError> {
        let records: Vec<ProductRecord> = self.products.values().map(Product::to_record).collect();
        self.store.save(&records)
    }

    fn product_mut(&mut self, id: ProductId) -> DomainResult<&mut Product> {
        self.products.get_mut(&id).ok_or(DomainError::not_found(id))
    }

    fn persist(&self, operation: &'static str) {
        match self.save() {
            Ok(()) => debug!(operation, products = self.products.len(), "inventory saved"),
            Err(err) => error!(
                operation,
                store = %self.store.describe(),
                error = %err,
                "failed to save inventory; keeping in-memory state"
            ),
        }
    }
}
