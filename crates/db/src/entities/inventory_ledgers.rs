//! `SeaORM` Entity for inventory_ledgers table.
//!
//! Append-only. Quantity is signed: positive for STOCK_IN, negative for STOCK_OUT.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::MovementType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_ledgers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    pub item_id: Uuid,
    pub batch_id: Option<Uuid>,
    pub movement_type: MovementType,
    pub quantity: i32,
    #[sea_orm(nullable)]
    pub unit_cost: Option<Decimal>,
    pub issued_to: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inventory_items::Entity",
        from = "Column::ItemId",
        to = "super::inventory_items::Column::Id"
    )]
    InventoryItems,
    #[sea_orm(
        belongs_to = "super::inventory_batches::Entity",
        from = "Column::BatchId",
        to = "super::inventory_batches::Column::Id"
    )]
    InventoryBatches,
}

impl Related<super::inventory_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryItems.def()
    }
}

impl Related<super::inventory_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryBatches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
