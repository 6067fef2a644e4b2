//! Depreciation domain types.

use backoffice_shared::types::{AccountId, DepreciationScheduleId, FixedAssetId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::journal::JournalLine;

/// Lifecycle of a schedule row. POSTED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    /// Not yet posted to the journal.
    Pending,
    /// Posted; linked to a journal entry.
    Posted,
}

impl ScheduleStatus {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Posted => "POSTED",
        }
    }
}

/// (expense account, accumulated depreciation account) of an asset's setting.
///
/// Ordering is by expense account then accumulated account, which fixes the
/// order groups are posted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountPair {
    /// Debited with the depreciation expense.
    pub expense_account_id: AccountId,
    /// Credited as contra-asset.
    pub accumulated_account_id: AccountId,
}

/// Pending schedule row as read for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSchedule {
    /// Schedule row id.
    pub schedule_id: DepreciationScheduleId,
    /// Asset depreciated.
    pub fixed_asset_id: FixedAssetId,
    /// Period end date.
    pub depreciation_date: NaiveDate,
    /// Amount for the period.
    pub amount: Decimal,
}

/// Pending schedules sharing an account pair, posted as one journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostingGroup {
    /// Accounts the journal debits and credits.
    pub account_pair: AccountPair,
    /// Schedules in the group, ordered by date then id.
    pub schedules: Vec<PendingSchedule>,
    /// Σ schedule amounts.
    pub total: Decimal,
}

impl PostingGroup {
    /// Two-line journal: DEBIT expense, CREDIT accumulated depreciation.
    #[must_use]
    pub fn journal_lines(&self) -> Vec<JournalLine> {
        vec![
            JournalLine::debit(self.account_pair.expense_account_id, self.total)
                .with_memo("Depreciation expense"),
            JournalLine::credit(self.account_pair.accumulated_account_id, self.total)
                .with_memo("Accumulated depreciation"),
        ]
    }

    /// Ids of the schedules in the group.
    #[must_use]
    pub fn schedule_ids(&self) -> Vec<DepreciationScheduleId> {
        self.schedules.iter().map(|s| s.schedule_id).collect()
    }
}

/// Inputs of a straight-line schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetTerms {
    /// Cost at acquisition.
    pub acquisition_cost: Decimal,
    /// Residual value at end of life.
    pub salvage_value: Decimal,
    /// Number of monthly periods.
    pub useful_life_months: i32,
    /// Any date in the first depreciation month.
    pub start_date: NaiveDate,
}

impl AssetTerms {
    /// Cost minus salvage.
    #[must_use]
    pub fn depreciable_base(&self) -> Decimal {
        self.acquisition_cost - self.salvage_value
    }
}

/// One generated schedule period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlannedDepreciation {
    /// 1-based period number.
    pub period: i32,
    /// Month-end date of the period.
    pub depreciation_date: NaiveDate,
    /// Amount for the period.
    pub amount: Decimal,
}

/// Outcome of a depreciation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DepreciationRunSummary {
    /// Journals written, one per posted group.
    pub journals_created: u32,
    /// Schedules moved to POSTED.
    pub schedules_posted: u32,
    /// Σ amounts posted.
    pub total_amount: Decimal,
}

impl DepreciationRunSummary {
    /// Adds one posted group.
    pub fn record(&mut self, schedules: u32, amount: Decimal) {
        self.journals_created += 1;
        self.schedules_posted += schedules;
        self.total_amount += amount;
    }
}
