//! Integration tests for FIFO stock movements and the inventory ledger.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use backoffice_core::inventory::InventoryError;
use backoffice_db::entities::sea_orm_active_enums::MovementType;
use backoffice_db::repositories::{
    CreateItemInput, InventoryRepository, LedgerFilter, StockError, StockInInput, StockOutInput,
};
use backoffice_shared::AppError;
use backoffice_shared::types::PageRequest;
use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use common::{count_ledger_rows, create_item, date, receive, setup};

fn issue(ctx: &common::TestContext, item_id: Uuid, quantity: i32) -> StockOutInput {
    StockOutInput {
        business_id: ctx.business_id,
        item_id,
        quantity,
        issued_to: Some("Kitchen".to_string()),
        notes: None,
    }
}

#[tokio::test]
async fn test_stock_in_creates_batch_and_ledger_entry() {
    let ctx = setup().await;
    let repo = InventoryRepository::new(ctx.db.clone());
    let item_id = create_item(&ctx, "RICE-5KG", 0).await;

    let batch = repo
        .stock_in(StockInInput {
            business_id: ctx.business_id,
            item_id,
            quantity_received: 12,
            unit_cost: dec!(8),
            received_date: date(2025, 3, 1),
            expiration_date: Some(date(2025, 9, 1)),
            notes: Some("PO-77".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(batch.quantity_received, 12);
    assert_eq!(batch.current_quantity, 12);

    let ledgers = repo
        .get_ledgers(ctx.business_id, LedgerFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(ledgers.meta.total, 1);
    let entry = &ledgers.data[0];
    assert_eq!(entry.movement_type, MovementType::StockIn);
    assert_eq!(entry.quantity, 12);
    assert_eq!(entry.batch_id, Some(batch.id));
    assert_eq!(entry.unit_cost, Some(dec!(8)));
    assert_eq!(entry.notes.as_deref(), Some("PO-77"));
}

#[tokio::test]
async fn test_stock_in_rejects_invalid_input() {
    let ctx = setup().await;
    let repo = InventoryRepository::new(ctx.db.clone());
    let item_id = create_item(&ctx, "OIL-1L", 0).await;

    let base = StockInInput {
        business_id: ctx.business_id,
        item_id,
        quantity_received: 0,
        unit_cost: dec!(5),
        received_date: date(2025, 3, 10),
        expiration_date: None,
        notes: None,
    };

    let zero = repo.stock_in(base.clone()).await.unwrap_err();
    assert!(matches!(
        zero,
        StockError::Inventory(InventoryError::InvalidQuantity(0))
    ));

    let expired = repo
        .stock_in(StockInInput {
            quantity_received: 3,
            expiration_date: Some(date(2025, 3, 9)),
            ..base.clone()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        expired,
        StockError::Inventory(InventoryError::ExpiresBeforeReceived { .. })
    ));

    let unknown = repo
        .stock_in(StockInInput {
            item_id: Uuid::now_v7(),
            quantity_received: 3,
            ..base
        })
        .await
        .unwrap_err();
    assert!(matches!(
        unknown,
        StockError::Inventory(InventoryError::ItemNotFound(_))
    ));

    assert_eq!(count_ledger_rows(&ctx, None).await, 0);
}

#[tokio::test]
async fn test_stock_out_consumes_oldest_batch_first() {
    let ctx = setup().await;
    let repo = InventoryRepository::new(ctx.db.clone());
    let item_id = create_item(&ctx, "FLOUR", 0).await;

    // Newer batch is received first to prove ordering is by received date
    let batch_b = receive(&ctx, item_id, 10, dec!(12), date(2025, 1, 5)).await;
    let batch_a = receive(&ctx, item_id, 5, dec!(10), date(2025, 1, 1)).await;

    let result = repo.stock_out(issue(&ctx, item_id, 7)).await.unwrap();

    assert_eq!(result.quantity, 7);
    assert_eq!(result.consumptions.len(), 2);
    assert_eq!(result.consumptions[0].batch_id.into_inner(), batch_a);
    assert_eq!(result.consumptions[0].quantity, 5);
    assert_eq!(result.consumptions[1].batch_id.into_inner(), batch_b);
    assert_eq!(result.consumptions[1].quantity, 2);
    assert_eq!(result.total_cost, dec!(74));
    assert_eq!(result.ledger_entry_ids.len(), 2);

    let batches = repo.list_batches(ctx.business_id, item_id).await.unwrap();
    assert_eq!(batches[0].id, batch_a);
    assert_eq!(batches[0].current_quantity, 0);
    assert_eq!(batches[1].id, batch_b);
    assert_eq!(batches[1].current_quantity, 8);

    let out = repo
        .get_ledgers(
            ctx.business_id,
            LedgerFilter {
                movement_type: Some(MovementType::StockOut),
                ..LedgerFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(out.meta.total, 2);
    let mut quantities: Vec<(Option<Uuid>, i32)> =
        out.data.iter().map(|e| (e.batch_id, e.quantity)).collect();
    quantities.sort();
    let mut expected = vec![(Some(batch_a), -5), (Some(batch_b), -2)];
    expected.sort();
    assert_eq!(quantities, expected);
    assert!(out.data.iter().all(|e| e.issued_to.as_deref() == Some("Kitchen")));

    assert_eq!(repo.available_quantity(ctx.business_id, item_id).await.unwrap(), 8);
}

#[tokio::test]
async fn test_same_received_date_uses_insertion_order() {
    let ctx = setup().await;
    let repo = InventoryRepository::new(ctx.db.clone());
    let item_id = create_item(&ctx, "SUGAR", 0).await;

    let first = receive(&ctx, item_id, 3, dec!(4), date(2025, 2, 1)).await;
    let second = receive(&ctx, item_id, 3, dec!(6), date(2025, 2, 1)).await;

    let result = repo.stock_out(issue(&ctx, item_id, 4)).await.unwrap();

    assert_eq!(result.consumptions[0].batch_id.into_inner(), first);
    assert_eq!(result.consumptions[0].quantity, 3);
    assert_eq!(result.consumptions[1].batch_id.into_inner(), second);
    assert_eq!(result.consumptions[1].quantity, 1);
    assert_eq!(result.total_cost, dec!(18));
}

#[tokio::test]
async fn test_insufficient_stock_changes_nothing() {
    let ctx = setup().await;
    let repo = InventoryRepository::new(ctx.db.clone());
    let item_id = create_item(&ctx, "SALT", 0).await;
    receive(&ctx, item_id, 4, dec!(2), date(2025, 1, 1)).await;
    receive(&ctx, item_id, 6, dec!(3), date(2025, 1, 2)).await;

    let err = repo.stock_out(issue(&ctx, item_id, 15)).await.unwrap_err();
    assert!(matches!(
        err,
        StockError::Inventory(InventoryError::InsufficientStock {
            requested: 15,
            available: 10
        })
    ));
    assert_eq!(err.http_status_code(), 409);
    assert!(matches!(AppError::from(err), AppError::Conflict(_)));

    let batches = repo.list_batches(ctx.business_id, item_id).await.unwrap();
    let remaining: Vec<i32> = batches.iter().map(|b| b.current_quantity).collect();
    assert_eq!(remaining, vec![4, 6]);

    assert_eq!(count_ledger_rows(&ctx, None).await, 2, "only the two stock-in rows exist");
}

#[tokio::test]
async fn test_stock_out_exact_quantity_empties_batches() {
    let ctx = setup().await;
    let repo = InventoryRepository::new(ctx.db.clone());
    let item_id = create_item(&ctx, "EGGS", 0).await;
    receive(&ctx, item_id, 6, dec!(1), date(2025, 1, 1)).await;

    let result = repo.stock_out(issue(&ctx, item_id, 6)).await.unwrap();
    assert_eq!(result.consumptions.len(), 1);
    assert_eq!(result.consumptions[0].remaining_in_batch, 0);

    assert_eq!(repo.available_quantity(ctx.business_id, item_id).await.unwrap(), 0);
    assert!(!repo.is_stock_sufficient(ctx.business_id, item_id, 1).await.unwrap());

    let err = repo.stock_out(issue(&ctx, item_id, 1)).await.unwrap_err();
    assert!(matches!(
        err,
        StockError::Inventory(InventoryError::InsufficientStock { available: 0, .. })
    ));
}

#[tokio::test]
async fn test_stock_out_rejects_non_positive_quantity() {
    let ctx = setup().await;
    let repo = InventoryRepository::new(ctx.db.clone());
    let item_id = create_item(&ctx, "TEA", 0).await;
    receive(&ctx, item_id, 6, dec!(1), date(2025, 1, 1)).await;

    for quantity in [0, -3] {
        let err = repo.stock_out(issue(&ctx, item_id, quantity)).await.unwrap_err();
        assert!(matches!(
            err,
            StockError::Inventory(InventoryError::InvalidQuantity(q)) if q == quantity
        ));
    }
    assert_eq!(repo.available_quantity(ctx.business_id, item_id).await.unwrap(), 6);
}

#[tokio::test]
async fn test_is_stock_sufficient() {
    let ctx = setup().await;
    let repo = InventoryRepository::new(ctx.db.clone());
    let item_id = create_item(&ctx, "MILK", 0).await;
    receive(&ctx, item_id, 5, dec!(3), date(2025, 1, 1)).await;
    receive(&ctx, item_id, 5, dec!(3), date(2025, 1, 8)).await;

    assert!(repo.is_stock_sufficient(ctx.business_id, item_id, 10).await.unwrap());
    assert!(!repo.is_stock_sufficient(ctx.business_id, item_id, 11).await.unwrap());
    assert!(repo.is_stock_sufficient(ctx.business_id, item_id, 0).await.unwrap());
}

#[tokio::test]
async fn test_ledger_filters_and_pagination() {
    let ctx = setup().await;
    let repo = InventoryRepository::new(ctx.db.clone());
    let coffee = create_item(&ctx, "COFFEE", 0).await;
    let cocoa = create_item(&ctx, "COCOA", 0).await;

    let coffee_batch = receive(&ctx, coffee, 10, dec!(20), date(2025, 1, 1)).await;
    receive(&ctx, coffee, 10, dec!(21), date(2025, 1, 2)).await;
    receive(&ctx, cocoa, 4, dec!(9), date(2025, 1, 1)).await;
    repo.stock_out(issue(&ctx, coffee, 3)).await.unwrap();

    let all = repo
        .get_ledgers(ctx.business_id, LedgerFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.meta.total, 4);
    assert_eq!(all.data[0].movement_type, MovementType::StockOut, "newest first");

    let by_item = repo
        .get_ledgers(
            ctx.business_id,
            LedgerFilter {
                item_id: Some(coffee),
                ..LedgerFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_item.meta.total, 3);

    let by_batch = repo
        .get_ledgers(
            ctx.business_id,
            LedgerFilter {
                batch_id: Some(coffee_batch),
                ..LedgerFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_batch.meta.total, 2);

    let today = Utc::now().date_naive();
    let in_range = repo
        .get_ledgers(
            ctx.business_id,
            LedgerFilter {
                date_from: Some(today),
                date_to: Some(today),
                ..LedgerFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(in_range.meta.total, 4);

    let yesterday = today.pred_opt().unwrap();
    let before = repo
        .get_ledgers(
            ctx.business_id,
            LedgerFilter {
                date_to: Some(yesterday),
                ..LedgerFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(before.meta.total, 0);

    let through_last_date = repo
        .get_ledgers(
            ctx.business_id,
            LedgerFilter {
                date_to: Some(NaiveDate::MAX),
                ..LedgerFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(through_last_date.meta.total, 4);

    let page_two = repo
        .get_ledgers(ctx.business_id, LedgerFilter::default(), PageRequest::new(2, 3))
        .await
        .unwrap();
    assert_eq!(page_two.meta.total, 4);
    assert_eq!(page_two.meta.total_pages, 2);
    assert_eq!(page_two.data.len(), 1);

    let other_business = repo
        .get_ledgers(Uuid::now_v7(), LedgerFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(other_business.meta.total, 0);
}

#[tokio::test]
async fn test_duplicate_sku_is_conflict() {
    let ctx = setup().await;
    let repo = InventoryRepository::new(ctx.db.clone());
    create_item(&ctx, "BEANS", 0).await;

    let err = repo
        .create_item(CreateItemInput {
            business_id: ctx.business_id,
            sku: "BEANS".to_string(),
            name: "Other beans".to_string(),
            reorder_level: 0,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StockError::Inventory(InventoryError::DuplicateSku(ref sku)) if sku == "BEANS"
    ));
    assert_eq!(AppError::from(err).status_code(), 409);

    // Same SKU in another business is fine
    repo.create_item(CreateItemInput {
        business_id: Uuid::now_v7(),
        sku: "BEANS".to_string(),
        name: "Beans".to_string(),
        reorder_level: 0,
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_items_are_scoped_to_business() {
    let ctx = setup().await;
    let repo = InventoryRepository::new(ctx.db.clone());
    let item_id = create_item(&ctx, "HONEY", 0).await;
    receive(&ctx, item_id, 5, dec!(7), date(2025, 1, 1)).await;

    let err = repo
        .stock_out(StockOutInput {
            business_id: Uuid::now_v7(),
            ..issue(&ctx, item_id, 1)
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StockError::Inventory(InventoryError::ItemNotFound(id)) if id == item_id
    ));
    assert!(matches!(AppError::from(err), AppError::NotFound(_)));
    assert_eq!(repo.available_quantity(ctx.business_id, item_id).await.unwrap(), 5);
}

#[tokio::test]
async fn test_stock_summary_and_low_stock_report() {
    let ctx = setup().await;
    let repo = InventoryRepository::new(ctx.db.clone());
    let butter = create_item(&ctx, "BUTTER", 5).await;
    let cheese = create_item(&ctx, "CHEESE", 2).await;
    create_item(&ctx, "YEAST", 1).await;

    receive(&ctx, butter, 3, dec!(10), date(2025, 1, 1)).await;
    receive(&ctx, butter, 2, dec!(15), date(2025, 1, 3)).await;
    receive(&ctx, cheese, 8, dec!(4), date(2025, 1, 1)).await;

    let summary = repo.stock_summary(ctx.business_id, butter).await.unwrap();
    assert_eq!(summary.on_hand, 5);
    assert_eq!(summary.value, dec!(60));

    let low = repo.items_below_reorder_level(ctx.business_id).await.unwrap();
    let skus: Vec<(&str, i64)> = low.iter().map(|l| (l.item.sku.as_str(), l.on_hand)).collect();
    assert_eq!(skus, vec![("BUTTER", 5), ("YEAST", 0)]);

    let reject = repo
        .create_item(CreateItemInput {
            business_id: ctx.business_id,
            sku: "FLOUR".to_string(),
            name: "Flour".to_string(),
            reorder_level: -1,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        reject,
        StockError::Inventory(InventoryError::NegativeReorderLevel(-1))
    ));
}
