//! `SeaORM` Entity for depreciation_schedules table.
//!
//! `posted_journal_entry_id` is a back-reference only, with no foreign key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ScheduleStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "depreciation_schedules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fixed_asset_id: Uuid,
    pub depreciation_date: Date,
    pub depreciation_amount: Decimal,
    pub status: ScheduleStatus,
    pub posted_journal_entry_id: Option<Uuid>,
    pub posted_at: Option<DateTimeWithTimeZone>,
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
