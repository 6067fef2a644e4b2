//! Inventory error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during inventory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Quantity must be strictly positive.
    #[error("Quantity must be greater than zero, got {0}")]
    InvalidQuantity(i32),

    /// Unit cost cannot be negative.
    #[error("Unit cost cannot be negative, got {0}")]
    NegativeUnitCost(Decimal),

    /// Expiration date precedes the received date.
    #[error("Expiration date {expiration} is before received date {received}")]
    ExpiresBeforeReceived {
        /// Date the batch was received.
        received: NaiveDate,
        /// Expiration date supplied.
        expiration: NaiveDate,
    },

    /// Reorder level cannot be negative.
    #[error("Reorder level cannot be negative, got {0}")]
    NegativeReorderLevel(i32),

    /// Inventory item not found in the business.
    #[error("Inventory item not found: {0}")]
    ItemNotFound(Uuid),

    /// SKU already used by another item of the same business.
    #[error("SKU already exists: {0}")]
    DuplicateSku(String),

    /// Not enough stock across all batches to satisfy the request.
    #[error("Insufficient stock. Requested: {requested}, available: {available}")]
    InsufficientStock {
        /// Quantity requested.
        requested: i32,
        /// Quantity available across all batches when checked.
        available: i64,
    },
}

impl InventoryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidQuantity(_) => "INVALID_QUANTITY",
            Self::NegativeUnitCost(_) => "NEGATIVE_UNIT_COST",
            Self::ExpiresBeforeReceived { .. } => "EXPIRES_BEFORE_RECEIVED",
            Self::NegativeReorderLevel(_) => "NEGATIVE_REORDER_LEVEL",
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::DuplicateSku(_) => "DUPLICATE_SKU",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidQuantity(_)
            | Self::NegativeUnitCost(_)
            | Self::ExpiresBeforeReceived { .. }
            | Self::NegativeReorderLevel(_) => 400,
            Self::ItemNotFound(_) => 404,
            Self::DuplicateSku(_) | Self::InsufficientStock { .. } => 409,
        }
    }
}
