//! `SeaORM` entity definitions.

pub mod chart_of_accounts;
pub mod depreciation_schedules;
pub mod depreciation_settings;
pub mod finance_settings;
pub mod fixed_assets;
pub mod inventory_batches;
pub mod inventory_items;
pub mod inventory_ledgers;
pub mod journal_details;
pub mod journal_entries;
pub mod sea_orm_active_enums;
