//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// unknown identifiers). Storage failures belong to the store layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Product name was empty or whitespace only.
    #[error("name cannot be empty")]
    InvalidName,

    /// Quantity was negative.
    #[error("quantity cannot be negative (got {0})")]
    InvalidQuantity(i64),

    /// Price was zero, negative, infinite or not a number.
    #[error("price must be a finite number greater than zero (got {0})")]
    InvalidPrice(f64),

    /// An operation referenced an unknown product.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Every id up to `u64::MAX` has been issued or loaded.
    #[error("no product ids left after {0}")]
    IdsExhausted(ProductId),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(id: ProductId) -> Self {
        Self::NotFound(id)
    }
}
