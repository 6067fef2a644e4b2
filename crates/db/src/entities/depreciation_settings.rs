//! `SeaORM` Entity for depreciation_settings table.
//!
//! One row per fixed asset. The account pair is what the depreciation run
//! groups schedules by.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "depreciation_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub fixed_asset_id: Uuid,
    pub useful_life_months: i32,
    pub expense_account_id: Uuid,
    pub accumulated_depreciation_account_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fixed_assets::Entity",
        from = "Column::FixedAssetId",
        to = "super::fixed_assets::Column::Id"
    )]
    FixedAssets,
}

impl Related<super::fixed_assets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FixedAssets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
