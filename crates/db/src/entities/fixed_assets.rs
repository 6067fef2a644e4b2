//! `SeaORM` Entity for fixed_assets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fixed_assets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub acquisition_date: Date,
    pub acquisition_cost: Decimal,
    pub salvage_value: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::depreciation_settings::Entity")]
    DepreciationSettings,
    #[sea_orm(has_many = "super::depreciation_schedules::Entity")]
    DepreciationSchedules,
}

impl Related<super::depreciation_settings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DepreciationSettings.def()
    }
}

impl Related<super::depreciation_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DepreciationSchedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
