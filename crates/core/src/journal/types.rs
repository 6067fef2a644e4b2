//! Journal domain types.

use backoffice_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// Debit line (increases assets/expenses).
    Debit,
    /// Credit line (increases liabilities/equity/revenue).
    Credit,
}

impl EntryType {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }
}

/// Business purpose of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JournalType {
    /// Manual general journal.
    General,
    /// Reclassification between accounts.
    Shifting,
    /// Opening balances of a new book.
    OpeningBalance,
    /// Posted by the depreciation run.
    Depreciation,
    /// Cash paid out against expense accounts.
    CashDisbursement,
}

impl JournalType {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "GENERAL",
            Self::Shifting => "SHIFTING",
            Self::OpeningBalance => "OPENING_BALANCE",
            Self::Depreciation => "DEPRECIATION",
            Self::CashDisbursement => "CASH_DISBURSEMENT",
        }
    }

    /// Journals created by the system itself cannot be edited or deleted by users.
    #[must_use]
    pub const fn is_system_generated(self) -> bool {
        matches!(self, Self::Depreciation)
    }
}

impl std::fmt::Display for JournalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Account in the chart of accounts.
    pub account_id: AccountId,
    /// Debit or credit.
    pub entry_type: EntryType,
    /// Line amount, strictly positive.
    pub amount: Decimal,
    /// Optional line memo.
    pub memo: Option<String>,
}

impl JournalLine {
    /// Creates a debit line.
    #[must_use]
    pub const fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            entry_type: EntryType::Debit,
            amount,
            memo: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub const fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            entry_type: EntryType::Credit,
            amount,
            memo: None,
        }
    }

    /// Attaches a memo to the line.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => self.amount,
            EntryType::Credit => -self.amount,
        }
    }
}

/// Debit and credit totals of a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct JournalTotals {
    /// Σ DEBIT amounts.
    pub debit: Decimal,
    /// Σ CREDIT amounts.
    pub credit: Decimal,
}

impl JournalTotals {
    /// Exact equality, no tolerance.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debit == self.credit
    }
}
