//! FIFO stock consumption planning.

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::InventoryError;
use super::types::{BatchSnapshot, Consumption, StockOutPlan};

/// FIFO ordering: oldest `received_date` first, ties broken by batch id.
///
/// Batch ids are UUID v7, so equal-date batches are consumed in insertion order.
#[must_use]
pub fn fifo_order(a: &BatchSnapshot, b: &BatchSnapshot) -> Ordering {
    a.received_date
        .cmp(&b.received_date)
        .then_with(|| a.batch_id.cmp(&b.batch_id))
}

/// Total quantity on hand across batches.
#[must_use]
pub fn total_available(batches: &[BatchSnapshot]) -> i64 {
    batches
        .iter()
        .filter(|b| b.current_quantity > 0)
        .map(|b| i64::from(b.current_quantity))
        .sum()
}

/// Advisory check: can `requested` be served from `available`?
#[must_use]
pub fn is_stock_sufficient(available: i64, requested: i32) -> bool {
    i64::from(requested) <= available
}

/// Plans a FIFO stock-out across `batches`.
///
/// Batches are consumed oldest first; each take is
/// `min(remaining, batch.current_quantity)`. The plan is all-or-nothing: if the
/// batches cannot cover `requested`, no plan is produced.
///
/// # Errors
///
/// - `InvalidQuantity` if `requested <= 0`
/// - `InsufficientStock` if the batches hold less than `requested`
pub fn plan_stock_out(
    batches: &[BatchSnapshot],
    requested: i32,
) -> Result<StockOutPlan, InventoryError> {
    if requested <= 0 {
        return Err(InventoryError::InvalidQuantity(requested));
    }

    let mut ordered: Vec<&BatchSnapshot> =
        batches.iter().filter(|b| b.current_quantity > 0).collect();
    ordered.sort_by(|a, b| fifo_order(a, b));

    let mut remaining = requested;
    let mut consumptions = Vec::new();

    for batch in ordered {
        if remaining == 0 {
            break;
        }

        let take = remaining.min(batch.current_quantity);
        consumptions.push(Consumption {
            batch_id: batch.batch_id,
            quantity: take,
            unit_cost: batch.unit_cost,
            remaining_in_batch: batch.current_quantity - take,
        });
        remaining -= take;
    }

    if remaining > 0 {
        return Err(InventoryError::InsufficientStock {
            requested,
            available: total_available(batches),
        });
    }

    Ok(StockOutPlan {
        requested,
        consumptions,
    })
}

/// Validates a stock-in before anything is written.
///
/// # Errors
///
/// - `InvalidQuantity` if `quantity <= 0`
/// - `NegativeUnitCost` if `unit_cost < 0`
/// - `ExpiresBeforeReceived` if the expiration date precedes the received date
pub fn validate_stock_in(
    quantity: i32,
    unit_cost: Decimal,
    received_date: NaiveDate,
    expiration_date: Option<NaiveDate>,
) -> Result<(), InventoryError> {
    if quantity <= 0 {
        return Err(InventoryError::InvalidQuantity(quantity));
    }
    if unit_cost < Decimal::ZERO {
        return Err(InventoryError::NegativeUnitCost(unit_cost));
    }
    if let Some(expiration) = expiration_date {
        if expiration < received_date {
            return Err(InventoryError::ExpiresBeforeReceived {
                received: received_date,
                expiration,
            });
        }
    }
    Ok(())
}

/// Returns true when on-hand stock has fallen to or below the reorder level.
#[must_use]
pub fn is_below_reorder_level(on_hand: i64, reorder_level: i32) -> bool {
    on_hand <= i64::from(reorder_level)
}
