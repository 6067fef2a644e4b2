//! Inventory repository: batches, FIFO stock-out, and the inventory ledger.
//!
//! Every state change runs in one database transaction. Stock-out locks the
//! item's batches (`SELECT ... FOR UPDATE`) so concurrent issues of the same
//! item serialize; the lock lasts until commit or rollback.

use std::collections::HashMap;

use backoffice_core::inventory::{
    BatchSnapshot, Consumption, InventoryError, MovementType as CoreMovementType, StockLevel,
    StockOutPlan, is_below_reorder_level, plan_stock_out, total_available, validate_stock_in,
};
use backoffice_shared::AppError;
use backoffice_shared::types::{BatchId, PageRequest, PageResponse};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::entities::{
    inventory_batches, inventory_items, inventory_ledgers, sea_orm_active_enums::MovementType,
};

/// Error types for inventory operations.
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    /// Domain rule violated.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl StockError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Inventory(e) => e.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Inventory(e) => e.http_status_code(),
            Self::Database(_) => 500,
        }
    }
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::Inventory(e) => match e.http_status_code() {
                404 => Self::NotFound(e.to_string()),
                409 => Self::Conflict(e.to_string()),
                _ => Self::Validation(e.to_string()),
            },
            StockError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating an inventory item.
#[derive(Debug, Clone)]
pub struct CreateItemInput {
    /// Owning business.
    pub business_id: Uuid,
    /// Stock keeping unit, unique per business.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Low-stock threshold.
    pub reorder_level: i32,
}

/// Input for receiving stock into a new batch.
#[derive(Debug, Clone)]
pub struct StockInInput {
    /// Owning business.
    pub business_id: Uuid,
    /// Item received.
    pub item_id: Uuid,
    /// Units received (> 0).
    pub quantity_received: i32,
    /// Cost per unit (>= 0).
    pub unit_cost: Decimal,
    /// Date the goods arrived. Drives FIFO order.
    pub received_date: NaiveDate,
    /// Optional expiry.
    pub expiration_date: Option<NaiveDate>,
    /// Optional ledger note.
    pub notes: Option<String>,
}

/// Input for issuing stock.
#[derive(Debug, Clone)]
pub struct StockOutInput {
    /// Owning business.
    pub business_id: Uuid,
    /// Item issued.
    pub item_id: Uuid,
    /// Units requested (> 0).
    pub quantity: i32,
    /// Recipient recorded on each ledger row.
    pub issued_to: Option<String>,
    /// Note recorded on each ledger row.
    pub notes: Option<String>,
}

/// Outcome of a successful stock-out.
#[derive(Debug, Clone)]
pub struct StockOutResult {
    /// Item issued.
    pub item_id: Uuid,
    /// Units issued; always the full request.
    pub quantity: i32,
    /// Takes per batch in FIFO order.
    pub consumptions: Vec<Consumption>,
    /// FIFO cost of the goods issued.
    pub total_cost: Decimal,
    /// Ledger rows written, one per take.
    pub ledger_entry_ids: Vec<Uuid>,
}

/// Filter options for listing ledger entries.
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    /// Only this item.
    pub item_id: Option<Uuid>,
    /// Only this batch.
    pub batch_id: Option<Uuid>,
    /// Only this movement type.
    pub movement_type: Option<MovementType>,
    /// Created on or after this date (UTC).
    pub date_from: Option<NaiveDate>,
    /// Created on or before this date (UTC).
    pub date_to: Option<NaiveDate>,
}

/// Item whose on-hand stock is at or below its reorder level.
#[derive(Debug, Clone)]
pub struct LowStockItem {
    /// The item.
    pub item: inventory_items::Model,
    /// Units on hand across batches.
    pub on_hand: i64,
}

/// Inventory repository.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    db: DatabaseConnection,
}

impl InventoryRepository {
    /// Creates a new inventory repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an inventory item.
    ///
    /// # Errors
    ///
    /// `DuplicateSku` if the SKU is taken in the business, including by a
    /// concurrent insert that lands between the check and the write.
    pub async fn create_item(
        &self,
        input: CreateItemInput,
    ) -> Result<inventory_items::Model, StockError> {
        if input.reorder_level < 0 {
            return Err(InventoryError::NegativeReorderLevel(input.reorder_level).into());
        }

        let existing = inventory_items::Entity::find()
            .filter(inventory_items::Column::BusinessId.eq(input.business_id))
            .filter(inventory_items::Column::Sku.eq(&input.sku))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(InventoryError::DuplicateSku(input.sku).into());
        }

        let item = insert_item(&self.db, input).await?;

        info!(
            business_id = %item.business_id,
            item_id = %item.id,
            sku = %item.sku,
            "Inventory item created"
        );
        Ok(item)
    }

    /// Gets an item of the business.
    ///
    /// # Errors
    ///
    /// `ItemNotFound` if it does not exist in the business.
    pub async fn find_item(
        &self,
        business_id: Uuid,
        item_id: Uuid,
    ) -> Result<inventory_items::Model, StockError> {
        find_item_in(&self.db, business_id, item_id).await
    }

    /// Receives stock into a new batch and records a STOCK_IN ledger entry.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity`, `NegativeUnitCost`, `ExpiresBeforeReceived` on bad input
    /// - `ItemNotFound` if the item is not in the business
    pub async fn stock_in(
        &self,
        input: StockInInput,
    ) -> Result<inventory_batches::Model, StockError> {
        validate_stock_in(
            input.quantity_received,
            input.unit_cost,
            input.received_date,
            input.expiration_date,
        )?;

        let txn = self.db.begin().await?;
        find_item_in(&txn, input.business_id, input.item_id).await?;

        let now: DateTime<FixedOffset> = Utc::now().into();
        let batch = inventory_batches::ActiveModel {
            id: Set(Uuid::now_v7()),
            business_id: Set(input.business_id),
            item_id: Set(input.item_id),
            quantity_received: Set(input.quantity_received),
            current_quantity: Set(input.quantity_received),
            unit_cost: Set(input.unit_cost),
            received_date: Set(input.received_date),
            expiration_date: Set(input.expiration_date),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let movement = CoreMovementType::StockIn;
        inventory_ledgers::ActiveModel {
            id: Set(Uuid::now_v7()),
            business_id: Set(input.business_id),
            item_id: Set(input.item_id),
            batch_id: Set(Some(batch.id)),
            movement_type: Set(movement.into()),
            quantity: Set(movement.signed(input.quantity_received)),
            unit_cost: Set(Some(input.unit_cost)),
            issued_to: Set(None),
            notes: Set(input.notes),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            business_id = %input.business_id,
            item_id = %input.item_id,
            batch_id = %batch.id,
            quantity = input.quantity_received,
            "Stock received"
        );
        Ok(batch)
    }

    /// Units on hand across all batches of the item.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn available_quantity(
        &self,
        business_id: Uuid,
        item_id: Uuid,
    ) -> Result<i64, StockError> {
        let batches = self.batch_snapshots(business_id, item_id).await?;
        Ok(total_available(&batches))
    }

    /// Advisory check whether `requested` units are on hand.
    ///
    /// The answer can be stale by the time a stock-out runs; `stock_out`
    /// re-checks under lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn is_stock_sufficient(
        &self,
        business_id: Uuid,
        item_id: Uuid,
        requested: i32,
    ) -> Result<bool, StockError> {
        let available = self.available_quantity(business_id, item_id).await?;
        Ok(backoffice_core::inventory::is_stock_sufficient(available, requested))
    }

    /// Issues stock FIFO across the item's batches.
    ///
    /// All or nothing: on `InsufficientStock` no batch is changed and no
    /// ledger row is written.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `quantity <= 0`
    /// - `ItemNotFound` if the item is not in the business
    /// - `InsufficientStock` if the batches cannot cover the request
    pub async fn stock_out(&self, input: StockOutInput) -> Result<StockOutResult, StockError> {
        if input.quantity <= 0 {
            return Err(InventoryError::InvalidQuantity(input.quantity).into());
        }

        let txn = self.db.begin().await?;
        find_item_in(&txn, input.business_id, input.item_id).await?;

        let locked = inventory_batches::Entity::find()
            .filter(inventory_batches::Column::BusinessId.eq(input.business_id))
            .filter(inventory_batches::Column::ItemId.eq(input.item_id))
            .filter(inventory_batches::Column::CurrentQuantity.gt(0))
            .order_by_asc(inventory_batches::Column::ReceivedDate)
            .order_by_asc(inventory_batches::Column::Id)
            .lock_exclusive()
            .all(&txn)
            .await?;
        let snapshots: Vec<BatchSnapshot> = locked.iter().map(snapshot).collect();

        let plan = match plan_stock_out(&snapshots, input.quantity) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(
                    business_id = %input.business_id,
                    item_id = %input.item_id,
                    requested = input.quantity,
                    available = total_available(&snapshots),
                    "Stock-out rejected"
                );
                return Err(err.into());
            }
        };

        let ledger_entry_ids = apply_stock_out(&txn, &input, &plan).await?;
        txn.commit().await?;

        let total_cost = plan.total_cost();
        info!(
            business_id = %input.business_id,
            item_id = %input.item_id,
            quantity = input.quantity,
            batches = plan.consumptions.len(),
            %total_cost,
            "Stock issued"
        );

        Ok(StockOutResult {
            item_id: input.item_id,
            quantity: input.quantity,
            consumptions: plan.consumptions,
            total_cost,
            ledger_entry_ids,
        })
    }

    /// Lists inventory ledger entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_ledgers(
        &self,
        business_id: Uuid,
        filter: LedgerFilter,
        page: PageRequest,
    ) -> Result<PageResponse<inventory_ledgers::Model>, StockError> {
        let page = page.normalized();
        let mut query = inventory_ledgers::Entity::find()
            .filter(inventory_ledgers::Column::BusinessId.eq(business_id));

        if let Some(item_id) = filter.item_id {
            query = query.filter(inventory_ledgers::Column::ItemId.eq(item_id));
        }
        if let Some(batch_id) = filter.batch_id {
            query = query.filter(inventory_ledgers::Column::BatchId.eq(batch_id));
        }
        if let Some(movement_type) = filter.movement_type {
            query = query.filter(inventory_ledgers::Column::MovementType.eq(movement_type));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(inventory_ledgers::Column::CreatedAt.gte(start_of_day(from)));
        }
        if let Some(to) = filter.date_to {
            // NaiveDate::MAX has no next day; every row is on or before it
            if let Some(next) = to.succ_opt() {
                query = query.filter(inventory_ledgers::Column::CreatedAt.lt(start_of_day(next)));
            }
        }

        let total = query.clone().count(&self.db).await?;
        let entries = query
            .order_by_desc(inventory_ledgers::Column::CreatedAt)
            .order_by_desc(inventory_ledgers::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        debug!(%business_id, total, returned = entries.len(), "Inventory ledger page loaded");
        Ok(PageResponse::new(entries, page.page, page.per_page, total))
    }

    /// Lists all batches of an item in FIFO order, including empty ones.
    ///
    /// # Errors
    ///
    /// `ItemNotFound` if the item is not in the business.
    pub async fn list_batches(
        &self,
        business_id: Uuid,
        item_id: Uuid,
    ) -> Result<Vec<inventory_batches::Model>, StockError> {
        find_item_in(&self.db, business_id, item_id).await?;
        Ok(inventory_batches::Entity::find()
            .filter(inventory_batches::Column::BusinessId.eq(business_id))
            .filter(inventory_batches::Column::ItemId.eq(item_id))
            .order_by_asc(inventory_batches::Column::ReceivedDate)
            .order_by_asc(inventory_batches::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Units on hand and their value at batch cost.
    ///
    /// # Errors
    ///
    /// `ItemNotFound` if the item is not in the business.
    pub async fn stock_summary(
        &self,
        business_id: Uuid,
        item_id: Uuid,
    ) -> Result<StockLevel, StockError> {
        find_item_in(&self.db, business_id, item_id).await?;
        let batches = self.batch_snapshots(business_id, item_id).await?;
        Ok(StockLevel::from_batches(&batches))
    }

    /// Items whose on-hand stock is at or below their reorder level, by SKU.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn items_below_reorder_level(
        &self,
        business_id: Uuid,
    ) -> Result<Vec<LowStockItem>, StockError> {
        let items = inventory_items::Entity::find()
            .filter(inventory_items::Column::BusinessId.eq(business_id))
            .order_by_asc(inventory_items::Column::Sku)
            .all(&self.db)
            .await?;

        let stocked: Vec<(Uuid, i32)> = inventory_batches::Entity::find()
            .select_only()
            .column(inventory_batches::Column::ItemId)
            .column(inventory_batches::Column::CurrentQuantity)
            .filter(inventory_batches::Column::BusinessId.eq(business_id))
            .filter(inventory_batches::Column::CurrentQuantity.gt(0))
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut on_hand_by_item: HashMap<Uuid, i64> = HashMap::new();
        for (item_id, quantity) in stocked {
            *on_hand_by_item.entry(item_id).or_default() += i64::from(quantity);
        }

        Ok(items
            .into_iter()
            .filter_map(|item| {
                let on_hand = on_hand_by_item.get(&item.id).copied().unwrap_or(0);
                is_below_reorder_level(on_hand, item.reorder_level)
                    .then_some(LowStockItem { item, on_hand })
            })
            .collect())
    }

    async fn batch_snapshots(
        &self,
        business_id: Uuid,
        item_id: Uuid,
    ) -> Result<Vec<BatchSnapshot>, StockError> {
        batch_snapshots_in(&self.db, business_id, item_id).await
    }
}

async fn insert_item<C: ConnectionTrait>(
    conn: &C,
    input: CreateItemInput,
) -> Result<inventory_items::Model, StockError> {
    let sku = input.sku.clone();
    let now = Utc::now().into();
    inventory_items::ActiveModel {
        id: Set(Uuid::now_v7()),
        business_id: Set(input.business_id),
        sku: Set(input.sku),
        name: Set(input.name),
        reorder_level: Set(input.reorder_level),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => InventoryError::DuplicateSku(sku).into(),
        _ => err.into(),
    })
}

/// Applies a FIFO plan: one guarded decrement and one STOCK_OUT ledger row
/// per consumption.
///
/// A decrement that matches no row means the batch changed after it was read.
/// The error then reports what is on hand once the earlier takes of this plan
/// are undone, and the caller must drop the transaction so they roll back.
async fn apply_stock_out<C: ConnectionTrait>(
    conn: &C,
    input: &StockOutInput,
    plan: &StockOutPlan,
) -> Result<Vec<Uuid>, StockError> {
    let now: DateTime<FixedOffset> = Utc::now().into();
    let movement = CoreMovementType::StockOut;
    let mut ledger_entry_ids = Vec::with_capacity(plan.consumptions.len());
    let mut taken: i64 = 0;

    for take in &plan.consumptions {
        // Guarded decrement: never lets a batch go below zero
        let updated = inventory_batches::Entity::update_many()
            .col_expr(
                inventory_batches::Column::CurrentQuantity,
                Expr::col(inventory_batches::Column::CurrentQuantity).sub(take.quantity),
            )
            .filter(inventory_batches::Column::Id.eq(take.batch_id.into_inner()))
            .filter(inventory_batches::Column::CurrentQuantity.gte(take.quantity))
            .exec(conn)
            .await?;

        if updated.rows_affected != 1 {
            let on_hand = batch_snapshots_in(conn, input.business_id, input.item_id).await?;
            let available = total_available(&on_hand) + taken;
            warn!(
                batch_id = %take.batch_id,
                requested = input.quantity,
                available,
                "Batch changed during stock-out"
            );
            return Err(InventoryError::InsufficientStock {
                requested: input.quantity,
                available,
            }
            .into());
        }

        let entry = inventory_ledgers::ActiveModel {
            id: Set(Uuid::now_v7()),
            business_id: Set(input.business_id),
            item_id: Set(input.item_id),
            batch_id: Set(Some(take.batch_id.into_inner())),
            movement_type: Set(movement.into()),
            quantity: Set(movement.signed(take.quantity)),
            unit_cost: Set(Some(take.unit_cost)),
            issued_to: Set(input.issued_to.clone()),
            notes: Set(input.notes.clone()),
            created_at: Set(now),
        }
        .insert(conn)
        .await?;
        ledger_entry_ids.push(entry.id);
        taken += i64::from(take.quantity);
    }

    Ok(ledger_entry_ids)
}

async fn batch_snapshots_in<C: ConnectionTrait>(
    conn: &C,
    business_id: Uuid,
    item_id: Uuid,
) -> Result<Vec<BatchSnapshot>, StockError> {
    let batches = inventory_batches::Entity::find()
        .filter(inventory_batches::Column::BusinessId.eq(business_id))
        .filter(inventory_batches::Column::ItemId.eq(item_id))
        .filter(inventory_batches::Column::CurrentQuantity.gt(0))
        .all(conn)
        .await?;
    Ok(batches.iter().map(snapshot).collect())
}

async fn find_item_in<C: ConnectionTrait>(
    conn: &C,
    business_id: Uuid,
    item_id: Uuid,
) -> Result<inventory_items::Model, StockError> {
    inventory_items::Entity::find_by_id(item_id)
        .filter(inventory_items::Column::BusinessId.eq(business_id))
        .one(conn)
        .await?
        .ok_or_else(|| InventoryError::ItemNotFound(item_id).into())
}

fn snapshot(batch: &inventory_batches::Model) -> BatchSnapshot {
    BatchSnapshot {
        batch_id: BatchId::from_uuid(batch.id),
        received_date: batch.received_date,
        current_quantity: batch.current_quantity,
        unit_cost: batch.unit_cost,
    }
}

/// Midnight UTC at the start of `date`.
pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<FixedOffset> {
    date.and_time(NaiveTime::MIN).and_utc().fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use rust_decimal_macros::dec;

    async fn setup() -> DatabaseConnection {
        let db = testing::sqlite().await;
        testing::create_table(&db, inventory_items::Entity).await;
        testing::create_table(&db, inventory_batches::Entity).await;
        testing::create_table(&db, inventory_ledgers::Entity).await;
        testing::create_unique_index(&db, "inventory_items", &["business_id", "sku"]).await;
        db
    }

    fn bolt(business_id: Uuid) -> CreateItemInput {
        CreateItemInput {
            business_id,
            sku: "BOLT-M8".to_string(),
            name: "M8 bolt".to_string(),
            reorder_level: 0,
        }
    }

    async fn receive(
        repo: &InventoryRepository,
        business_id: Uuid,
        item_id: Uuid,
        quantity: i32,
        day: u32,
    ) -> inventory_batches::Model {
        repo.stock_in(StockInInput {
            business_id,
            item_id,
            quantity_received: quantity,
            unit_cost: dec!(2),
            received_date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            expiration_date: None,
            notes: None,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_batch_changed_after_planning_rolls_back() {
        let db = setup().await;
        let repo = InventoryRepository::new(db.clone());
        let business_id = Uuid::now_v7();
        let item = repo.create_item(bolt(business_id)).await.unwrap();
        let older = receive(&repo, business_id, item.id, 5, 1).await;
        let newer = receive(&repo, business_id, item.id, 10, 2).await;

        let snapshots = batch_snapshots_in(&db, business_id, item.id).await.unwrap();
        let plan = plan_stock_out(&snapshots, 7).unwrap();
        assert_eq!(plan.consumptions.len(), 2);

        // Another writer drains the newer batch between planning and applying
        inventory_batches::Entity::update_many()
            .col_expr(inventory_batches::Column::CurrentQuantity, Expr::value(1))
            .filter(inventory_batches::Column::Id.eq(newer.id))
            .exec(&db)
            .await
            .unwrap();

        let input = StockOutInput {
            business_id,
            item_id: item.id,
            quantity: 7,
            issued_to: None,
            notes: None,
        };
        let txn = db.begin().await.unwrap();
        let err = apply_stock_out(&txn, &input, &plan).await.unwrap_err();
        drop(txn);

        assert!(matches!(
            err,
            StockError::Inventory(InventoryError::InsufficientStock {
                requested: 7,
                available: 6
            })
        ));

        let batches = repo.list_batches(business_id, item.id).await.unwrap();
        let quantities: Vec<(Uuid, i32)> =
            batches.iter().map(|b| (b.id, b.current_quantity)).collect();
        assert_eq!(quantities, vec![(older.id, 5), (newer.id, 1)]);

        let issued = inventory_ledgers::Entity::find()
            .filter(inventory_ledgers::Column::BusinessId.eq(business_id))
            .filter(inventory_ledgers::Column::MovementType.eq(MovementType::StockOut))
            .count(&db)
            .await
            .unwrap();
        assert_eq!(issued, 0);
    }

    #[tokio::test]
    async fn test_unique_violation_maps_to_duplicate_sku() {
        let db = setup().await;
        let business_id = Uuid::now_v7();
        insert_item(&db, bolt(business_id)).await.unwrap();

        // A writer whose SKU check ran before the first insert landed
        let err = insert_item(&db, bolt(business_id)).await.unwrap_err();

        assert!(matches!(
            &err,
            StockError::Inventory(InventoryError::DuplicateSku(sku)) if sku == "BOLT-M8"
        ));
        assert!(matches!(AppError::from(err), AppError::Conflict(_)));
    }

    #[test]
    fn test_start_of_day_is_utc_midnight() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(start_of_day(day).to_rfc3339(), "2025-03-09T00:00:00+00:00");
    }
}
