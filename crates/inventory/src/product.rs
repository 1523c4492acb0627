use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};

/// Entity: Product.
///
/// Fields are private so every change goes through a validating mutator.
/// `quantity >= 0` and `price > 0` hold for every live instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    quantity: i64,
    price: f64,
}

impl Product {
    /// Build a product from already-validated parts.
    ///
    /// Only the inventory creates products; it checks name, quantity and price
    /// before calling this.
    pub(crate) fn new(id: ProductId, name: String, quantity: i64, price: f64) -> Self {
        Self {
            id,
            name,
            quantity,
            price,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Value of the stock on hand (`quantity * price`).
    pub fn stock_value(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    /// Case-insensitive substring match against the name.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn name_contains_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }

    pub fn set_quantity(&mut self, quantity: i64) -> DomainResult<()> {
        validate_quantity(quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    pub fn set_price(&mut self, price: f64) -> DomainResult<()> {
        validate_price(price)?;
        self.price = price;
        Ok(())
    }

    /// Persistence record for this product.
    pub fn to_record(&self) -> ProductRecord {
        ProductRecord {
            id: self.id,
            name: self.name.clone(),
            quantity: self.quantity,
            price: self.price,
        }
    }

    /// Rebuild a product from a persisted record, re-checking every invariant.
    pub fn from_record(record: ProductRecord) -> DomainResult<Self> {
        if !record.id.is_issued() {
            return Err(DomainError::invalid_id("ProductId: 0 is never issued"));
        }
        validate_name(&record.name)?;
        validate_quantity(record.quantity)?;
        validate_price(record.price)?;
        Ok(Self::new(record.id, record.name, record.quantity, record.price))
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "ID: {} | Name: {} | Quantity: {} | Price: ${:.2}",
            self.id, self.name, self.quantity, self.price
        )
    }
}

/// On-disk shape of a product.
///
/// Field names match the backing files written by earlier versions of the tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "precio")]
    pub price: f64,
}

pub(crate) fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName);
    }
    Ok(())
}

pub(crate) fn validate_quantity(quantity: i64) -> DomainResult<()> {
    if quantity < 0 {
        return Err(DomainError::InvalidQuantity(quantity));
    }
    Ok(())
}

pub(crate) fn validate_price(price: f64) -> DomainResult<()> {
    // Non-finite prices cannot be written to a JSON file.
    if !price.is_finite() || price <= 0.0 {
        return Err(DomainError::InvalidPrice(price));
    }
    Ok(())
}
