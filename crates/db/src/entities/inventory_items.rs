//! `SeaORM` Entity for inventory_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    pub sku: String,
    pub name: String,
    pub reorder_level: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inventory_batches::Entity")]
    InventoryBatches,
    #[sea_orm(has_many = "super::inventory_ledgers::Entity")]
    InventoryLedgers,
}

impl Related<super::inventory_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryBatches.def()
    }
}

impl Related<super::inventory_ledgers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryLedgers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
