//! Cash disbursement flow.
//!
//! Requires the business's default cash account. Each expense line is debited
//! and the cash account is credited with the total.

use backoffice_core::journal::{JournalError, JournalLine, JournalType};
use backoffice_core::settings::{DefaultAccount, SettingsError};
use backoffice_shared::AppError;
use backoffice_shared::types::AccountId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use tracing::{info, warn};
use uuid::Uuid;

use super::finance_settings::load_settings;
use super::journal::{
    CreateJournalInput, JournalWithLines, PostingError, insert_journal, journal_error_to_app,
};

/// Error types for cash disbursements.
#[derive(Debug, thiserror::Error)]
pub enum DisbursementError {
    /// Default cash account not configured.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Generated journal rejected.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PostingError> for DisbursementError {
    fn from(err: PostingError) -> Self {
        match err {
            PostingError::Journal(e) => Self::Journal(e),
            PostingError::Database(e) => Self::Database(e),
        }
    }
}

impl DisbursementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Settings(e) => e.error_code(),
            Self::Journal(e) => e.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Settings(e) => e.http_status_code(),
            Self::Journal(e) => e.http_status_code(),
            Self::Database(_) => 500,
        }
    }
}

impl From<DisbursementError> for AppError {
    fn from(err: DisbursementError) -> Self {
        match err {
            DisbursementError::Settings(e) => Self::Configuration(e.to_string()),
            DisbursementError::Journal(e) => journal_error_to_app(&e),
            DisbursementError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// One expense paid out of cash.
#[derive(Debug, Clone)]
pub struct ExpenseLine {
    /// Expense account debited.
    pub account_id: Uuid,
    /// Amount paid (> 0).
    pub amount: Decimal,
    /// Optional line memo.
    pub memo: Option<String>,
}

/// Input for recording a cash disbursement.
#[derive(Debug, Clone)]
pub struct CashDisbursementInput {
    /// Owning business.
    pub business_id: Uuid,
    /// Payment date.
    pub entry_date: NaiveDate,
    /// Header description.
    pub description: String,
    /// Optional voucher reference.
    pub reference: Option<String>,
    /// Expenses paid.
    pub lines: Vec<ExpenseLine>,
    /// Author.
    pub created_by: Uuid,
}

/// Cash disbursement repository.
#[derive(Debug, Clone)]
pub struct CashDisbursementRepository {
    db: DatabaseConnection,
}

impl CashDisbursementRepository {
    /// Creates a new cash disbursement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a CASH_DISBURSEMENT journal.
    ///
    /// # Errors
    ///
    /// - `Settings(NotConfigured(Cash))` if no default cash account is set
    /// - journal validation failures (no lines, non-positive amounts)
    /// - `AccountNotFound` for unknown expense accounts
    pub async fn record(
        &self,
        input: CashDisbursementInput,
    ) -> Result<JournalWithLines, DisbursementError> {
        let settings = load_settings(&self.db, input.business_id).await?;
        let cash_account = settings.require(DefaultAccount::Cash).inspect_err(|_| {
            warn!(
                business_id = %input.business_id,
                "Cash disbursement rejected: no default cash account"
            );
        })?;

        let journal_input = CreateJournalInput {
            business_id: input.business_id,
            entry_date: input.entry_date,
            description: input.description,
            journal_type: JournalType::CashDisbursement,
            reference: input.reference,
            lines: disbursement_lines(&input.lines, cash_account)?,
            created_by: input.created_by,
        };

        let txn = self.db.begin().await?;
        let journal = insert_journal(&txn, &journal_input).await?;
        txn.commit().await?;

        info!(
            business_id = %journal_input.business_id,
            journal_id = %journal.entry.id,
            expenses = input.lines.len(),
            "Cash disbursement recorded"
        );
        Ok(journal)
    }
}

/// One DEBIT per expense, then one CREDIT to cash for the total.
fn disbursement_lines(
    expenses: &[ExpenseLine],
    cash_account: AccountId,
) -> Result<Vec<JournalLine>, JournalError> {
    let total = expenses
        .iter()
        .try_fold(Decimal::ZERO, |acc, e| acc.checked_add(e.amount))
        .ok_or(JournalError::AmountOverflow)?;
    let mut lines: Vec<JournalLine> = expenses
        .iter()
        .map(|e| JournalLine {
            memo: e.memo.clone(),
            ..JournalLine::debit(AccountId::from_uuid(e.account_id), e.amount)
        })
        .collect();
    if !expenses.is_empty() {
        lines.push(JournalLine::credit(cash_account, total).with_memo("Cash paid"));
    }
    Ok(lines)
}
