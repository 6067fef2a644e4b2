//! Property-based tests for FIFO stock consumption.
//!
//! Covers conservation of quantity, non-negative batches, oldest-first
//! consumption, and all-or-nothing stock-outs.

use backoffice_shared::types::BatchId;
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::InventoryError;
use super::fifo::{fifo_order, plan_stock_out, total_available};
use super::types::BatchSnapshot;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// Strategy for a single batch: received within 60 days, 0..=50 units.
fn batch_strategy() -> impl Strategy<Value = BatchSnapshot> {
    (0i64..60, 0i32..=50, 0i64..10_000).prop_map(|(day, qty, cents)| BatchSnapshot {
        batch_id: BatchId::new(),
        received_date: base_date() + Duration::days(day),
        current_quantity: qty,
        unit_cost: Decimal::new(cents, 2),
    })
}

fn batches_strategy() -> impl Strategy<Value = Vec<BatchSnapshot>> {
    prop::collection::vec(batch_strategy(), 0..12)
}

/// A scripted movement against one item.
#[derive(Debug, Clone)]
enum Movement {
    In { day: i64, quantity: i32 },
    Out { quantity: i32 },
}

fn movement_strategy() -> impl Strategy<Value = Movement> {
    prop_oneof![
        (0i64..60, 1i32..=40).prop_map(|(day, quantity)| Movement::In { day, quantity }),
        (1i32..=60).prop_map(|quantity| Movement::Out { quantity }),
    ]
}

/// Applies a plan to the in-memory batches like the repository does.
fn apply(batches: &mut [BatchSnapshot], requested: i32) -> Result<i32, InventoryError> {
    let plan = plan_stock_out(batches, requested)?;
    for take in &plan.consumptions {
        let batch = batches
            .iter_mut()
            .find(|b| b.batch_id == take.batch_id)
            .expect("planned batch exists");
        batch.current_quantity -= take.quantity;
    }
    Ok(requested)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A successful plan takes exactly the requested quantity and never more
    /// than a batch holds.
    #[test]
    fn prop_plan_takes_exactly_requested(
        batches in batches_strategy(),
        requested in 1i32..400,
    ) {
        match plan_stock_out(&batches, requested) {
            Ok(plan) => {
                prop_assert_eq!(plan.total_quantity(), i64::from(requested));
                for take in &plan.consumptions {
                    prop_assert!(take.quantity > 0);
                    prop_assert!(take.remaining_in_batch >= 0);
                    let source = batches.iter().find(|b| b.batch_id == take.batch_id).unwrap();
                    prop_assert_eq!(
                        take.quantity + take.remaining_in_batch,
                        source.current_quantity
                    );
                }
            }
            Err(InventoryError::InsufficientStock { requested: r, available }) => {
                prop_assert_eq!(r, requested);
                prop_assert_eq!(available, total_available(&batches));
                prop_assert!(available < i64::from(requested));
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    /// Requests above total stock are always rejected.
    #[test]
    fn prop_overdraw_rejected(batches in batches_strategy(), extra in 1i32..50) {
        let total = i32::try_from(total_available(&batches)).unwrap();
        let result = plan_stock_out(&batches, total + extra);
        let is_insufficient = matches!(result, Err(InventoryError::InsufficientStock { .. }));
        prop_assert!(is_insufficient);
    }

    /// Takes follow FIFO order, and every batch older than the last one
    /// touched is fully drained.
    #[test]
    fn prop_oldest_batches_consumed_first(
        batches in batches_strategy(),
        requested in 1i32..400,
    ) {
        if let Ok(plan) = plan_stock_out(&batches, requested) {
            let touched: Vec<&BatchSnapshot> = plan
                .consumptions
                .iter()
                .map(|c| batches.iter().find(|b| b.batch_id == c.batch_id).unwrap())
                .collect();

            for pair in touched.windows(2) {
                prop_assert_eq!(fifo_order(pair[0], pair[1]), std::cmp::Ordering::Less);
            }

            // All takes but the last one drain their batch
            if let Some((_, head)) = plan.consumptions.split_last() {
                prop_assert!(head.iter().all(|c| c.remaining_in_batch == 0));
            }

            // Any non-empty batch ordered before the last touched one was consumed
            if let Some(last) = touched.last() {
                for b in batches.iter().filter(|b| b.current_quantity > 0) {
                    if fifo_order(b, last) == std::cmp::Ordering::Less {
                        let consumed = plan.consumptions.iter().any(|c| c.batch_id == b.batch_id);
                        prop_assert!(consumed, "older batch {} skipped", b.batch_id);
                    }
                }
            }
        }
    }

    /// For any sequence of stock-ins and stock-outs on one item:
    /// Σ current_quantity == Σ quantity_received − Σ issued, and no batch goes negative.
    #[test]
    fn prop_quantity_is_conserved(movements in prop::collection::vec(movement_strategy(), 1..40)) {
        let mut batches: Vec<BatchSnapshot> = Vec::new();
        let mut received: i64 = 0;
        let mut issued: i64 = 0;

        for movement in movements {
            match movement {
                Movement::In { day, quantity } => {
                    batches.push(BatchSnapshot {
                        batch_id: BatchId::new(),
                        received_date: base_date() + Duration::days(day),
                        current_quantity: quantity,
                        unit_cost: Decimal::ONE,
                    });
                    received += i64::from(quantity);
                }
                Movement::Out { quantity } => {
                    let before: Vec<i32> = batches.iter().map(|b| b.current_quantity).collect();
                    match apply(&mut batches, quantity) {
                        Ok(taken) => issued += i64::from(taken),
                        Err(_) => {
                            let after: Vec<i32> =
                                batches.iter().map(|b| b.current_quantity).collect();
                            prop_assert_eq!(before, after, "rejected stock-out mutated batches");
                        }
                    }
                }
            }

            prop_assert!(batches.iter().all(|b| b.current_quantity >= 0));
            prop_assert_eq!(total_available(&batches), received - issued);
        }
    }
}
