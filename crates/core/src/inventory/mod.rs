//! Inventory batch tracking and FIFO stock consumption.
//!
//! This module implements the pure side of the inventory engine:
//! - Movement types recorded in the inventory ledger
//! - Batch snapshots as loaded (and locked) by the persistence layer
//! - FIFO planning of a stock-out across batches
//! - Stock-in validation and reorder checks
//!
//! The persistence layer loads batches under a row lock, asks
//! [`plan_stock_out`] for a plan, and applies it inside the same transaction.

pub mod error;
pub mod fifo;
pub mod types;

#[cfg(test)]
mod fifo_props;

pub use error::InventoryError;
pub use fifo::{
    fifo_order, is_below_reorder_level, is_stock_sufficient, plan_stock_out, total_available,
    validate_stock_in,
};
pub use types::{BatchSnapshot, Consumption, MovementType, StockLevel, StockOutPlan};
