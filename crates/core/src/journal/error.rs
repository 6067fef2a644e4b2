//! Journal error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::types::JournalType;

/// Errors that can occur while validating or persisting a journal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    /// A journal needs at least one debit and one credit line.
    #[error("Journal must have at least 2 lines")]
    InsufficientLines,

    /// Line amount is zero or negative.
    #[error("Line {line} amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// 1-based line number.
        line: usize,
        /// Amount supplied.
        amount: Decimal,
    },

    /// All lines are on the same side.
    #[error("Journal must have both debit and credit lines")]
    SingleSided,

    /// Debits do not equal credits.
    #[error("Journal is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Σ DEBIT.
        debit: Decimal,
        /// Σ CREDIT.
        credit: Decimal,
    },

    /// Σ DEBIT or Σ CREDIT exceeds the decimal range.
    #[error("Journal amounts are too large to total")]
    AmountOverflow,

    /// Journal entry not found in the business.
    #[error("Journal entry not found: {0}")]
    NotFound(Uuid),

    /// Account not found in the business chart of accounts.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// System-generated journals cannot be edited or deleted.
    #[error("{0} journals are system generated and cannot be modified")]
    SystemJournal(JournalType),
}

impl JournalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::NonPositiveAmount { .. } => "INVALID_AMOUNT",
            Self::SingleSided => "SINGLE_SIDED",
            Self::Unbalanced { .. } => "UNBALANCED_JOURNAL",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::NotFound(_) => "JOURNAL_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::SystemJournal(_) => "SYSTEM_JOURNAL",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) | Self::AccountNotFound(_) => 404,
            Self::InsufficientLines
            | Self::NonPositiveAmount { .. }
            | Self::SingleSided
            | Self::Unbalanced { .. }
            | Self::AmountOverflow
            | Self::SystemJournal(_) => 400,
        }
    }
}
