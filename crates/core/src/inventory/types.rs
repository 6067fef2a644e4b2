//! Inventory domain types.

use backoffice_shared::types::BatchId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of quantity movement recorded in the inventory ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    /// Goods received into a new batch.
    StockIn,
    /// Goods issued out of one batch.
    StockOut,
    /// Manual correction.
    Adjustment,
}

impl MovementType {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StockIn => "STOCK_IN",
            Self::StockOut => "STOCK_OUT",
            Self::Adjustment => "ADJUSTMENT",
        }
    }

    /// Applies the ledger sign convention to an unsigned quantity.
    ///
    /// STOCK_IN is positive, STOCK_OUT is negative, ADJUSTMENT keeps the sign given.
    #[must_use]
    pub const fn signed(self, quantity: i32) -> i32 {
        match self {
            Self::StockIn => quantity.abs(),
            Self::StockOut => -quantity.abs(),
            Self::Adjustment => quantity,
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fields of a batch the FIFO planner needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSnapshot {
    /// Batch identifier (UUID v7, so it follows insertion order).
    pub batch_id: BatchId,
    /// Date the batch was received.
    pub received_date: NaiveDate,
    /// Quantity still on hand in the batch.
    pub current_quantity: i32,
    /// Cost per unit for this batch.
    pub unit_cost: Decimal,
}

/// Quantity taken from a single batch by a stock-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Consumption {
    /// Batch consumed from.
    pub batch_id: BatchId,
    /// Quantity taken (always > 0).
    pub quantity: i32,
    /// Unit cost of the batch.
    pub unit_cost: Decimal,
    /// Quantity left in the batch after the take.
    pub remaining_in_batch: i32,
}

impl Consumption {
    /// Returns the cost of the goods taken from this batch.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_cost
    }
}

/// Ordered takes that satisfy a stock-out request in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockOutPlan {
    /// Quantity requested.
    pub requested: i32,
    /// Takes in FIFO order.
    pub consumptions: Vec<Consumption>,
}

impl StockOutPlan {
    /// Sum of all takes; equals `requested` for any plan returned by the planner.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.consumptions.iter().map(|c| i64::from(c.quantity)).sum()
    }

    /// FIFO cost of the goods issued.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        self.consumptions.iter().map(Consumption::cost).sum()
    }
}

/// Stock on hand for an item and its value at batch cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StockLevel {
    /// Units on hand across all batches.
    pub on_hand: i64,
    /// Σ current_quantity × unit_cost.
    pub value: Decimal,
}

impl StockLevel {
    /// Computes the stock level of a set of batches.
    #[must_use]
    pub fn from_batches(batches: &[BatchSnapshot]) -> Self {
        batches
            .iter()
            .filter(|b| b.current_quantity > 0)
            .fold(Self::default(), |acc, b| Self {
                on_hand: acc.on_hand + i64::from(b.current_quantity),
                value: acc.value + Decimal::from(b.current_quantity) * b.unit_cost,
            })
    }
}
