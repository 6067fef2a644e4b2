//! `SeaORM` Entity for inventory_batches table.
//!
//! `current_quantity` only ever decreases, and stays within
//! `0..=quantity_received`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_batches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    pub item_id: Uuid,
    pub quantity_received: i32,
    pub current_quantity: i32,
    pub unit_cost: Decimal,
    pub received_date: Date,
    pub expiration_date: Option<Date>,
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
    #[sea_orm(has_many = "super::inventory_ledgers::Entity")]
    InventoryLedgers,
}

impl Related<super::inventory_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryItems.def()
    }
}

impl Related<super::inventory_ledgers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryLedgers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
