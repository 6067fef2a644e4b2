//! `SeaORM` active enums, stored as short uppercase strings.
//!
//! Each enum converts to and from its `backoffice-core` counterpart.

use backoffice_core::{depreciation, inventory, journal};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory ledger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum MovementType {
    /// Goods received.
    #[sea_orm(string_value = "STOCK_IN")]
    StockIn,
    /// Goods issued.
    #[sea_orm(string_value = "STOCK_OUT")]
    StockOut,
    /// Manual correction.
    #[sea_orm(string_value = "ADJUSTMENT")]
    Adjustment,
}

/// Journal line side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum EntryType {
    /// Debit.
    #[sea_orm(string_value = "DEBIT")]
    Debit,
    /// Credit.
    #[sea_orm(string_value = "CREDIT")]
    Credit,
}

/// Journal purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum JournalType {
    /// General journal.
    #[sea_orm(string_value = "GENERAL")]
    General,
    /// Shifting journal.
    #[sea_orm(string_value = "SHIFTING")]
    Shifting,
    /// Opening balance.
    #[sea_orm(string_value = "OPENING_BALANCE")]
    OpeningBalance,
    /// Depreciation posting.
    #[sea_orm(string_value = "DEPRECIATION")]
    Depreciation,
    /// Cash disbursement.
    #[sea_orm(string_value = "CASH_DISBURSEMENT")]
    CashDisbursement,
}

/// Depreciation schedule status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ScheduleStatus {
    /// Awaiting posting.
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Posted to a journal.
    #[sea_orm(string_value = "POSTED")]
    Posted,
}

/// Chart of accounts classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum AccountType {
    /// Asset.
    #[sea_orm(string_value = "ASSET")]
    Asset,
    /// Liability.
    #[sea_orm(string_value = "LIABILITY")]
    Liability,
    /// Equity.
    #[sea_orm(string_value = "EQUITY")]
    Equity,
    /// Revenue.
    #[sea_orm(string_value = "REVENUE")]
    Revenue,
    /// Expense.
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

impl From<inventory::MovementType> for MovementType {
    fn from(value: inventory::MovementType) -> Self {
        match value {
            inventory::MovementType::StockIn => Self::StockIn,
            inventory::MovementType::StockOut => Self::StockOut,
            inventory::MovementType::Adjustment => Self::Adjustment,
        }
    }
}

impl From<MovementType> for inventory::MovementType {
    fn from(value: MovementType) -> Self {
        match value {
            MovementType::StockIn => Self::StockIn,
            MovementType::StockOut => Self::StockOut,
            MovementType::Adjustment => Self::Adjustment,
        }
    }
}

impl From<journal::EntryType> for EntryType {
    fn from(value: journal::EntryType) -> Self {
        match value {
            journal::EntryType::Debit => Self::Debit,
            journal::EntryType::Credit => Self::Credit,
        }
    }
}

impl From<EntryType> for journal::EntryType {
    fn from(value: EntryType) -> Self {
        match value {
            EntryType::Debit => Self::Debit,
            EntryType::Credit => Self::Credit,
        }
    }
}

impl From<journal::JournalType> for JournalType {
    fn from(value: journal::JournalType) -> Self {
        match value {
            journal::JournalType::General => Self::General,
            journal::JournalType::Shifting => Self::Shifting,
            journal::JournalType::OpeningBalance => Self::OpeningBalance,
            journal::JournalType::Depreciation => Self::Depreciation,
            journal::JournalType::CashDisbursement => Self::CashDisbursement,
        }
    }
}

impl From<JournalType> for journal::JournalType {
    fn from(value: JournalType) -> Self {
        match value {
            JournalType::General => Self::General,
            JournalType::Shifting => Self::Shifting,
            JournalType::OpeningBalance => Self::OpeningBalance,
            JournalType::Depreciation => Self::Depreciation,
            JournalType::CashDisbursement => Self::CashDisbursement,
        }
    }
}

impl From<depreciation::ScheduleStatus> for ScheduleStatus {
    fn from(value: depreciation::ScheduleStatus) -> Self {
        match value {
            depreciation::ScheduleStatus::Pending => Self::Pending,
            depreciation::ScheduleStatus::Posted => Self::Posted,
        }
    }
}

impl From<ScheduleStatus> for depreciation::ScheduleStatus {
    fn from(value: ScheduleStatus) -> Self {
        match value {
            ScheduleStatus::Pending => Self::Pending,
            ScheduleStatus::Posted => Self::Posted,
        }
    }
}
