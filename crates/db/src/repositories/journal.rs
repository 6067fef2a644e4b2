//! Journal repository for double-entry journal persistence.
//!
//! Lines are validated with `backoffice_core::journal::validate_lines` before
//! any transaction is opened. A journal header and its details are always
//! written together.

use backoffice_core::journal::{
    JournalError, JournalLine, JournalType as CoreJournalType, validate_lines,
};
use backoffice_shared::AppError;
use backoffice_shared::types::{PageRequest, PageResponse};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::account::find_missing_account;
use crate::entities::{journal_details, journal_entries, sea_orm_active_enums::JournalType};

/// Error types for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    /// Journal rule violated.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl PostingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Journal(e) => e.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Journal(e) => e.http_status_code(),
            Self::Database(_) => 500,
        }
    }
}

impl From<PostingError> for AppError {
    fn from(err: PostingError) -> Self {
        match err {
            PostingError::Journal(e) => journal_error_to_app(&e),
            PostingError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

pub(crate) fn journal_error_to_app(err: &JournalError) -> AppError {
    match err {
        JournalError::NotFound(_) | JournalError::AccountNotFound(_) => {
            AppError::NotFound(err.to_string())
        }
        _ => AppError::Validation(err.to_string()),
    }
}

/// Input for creating a journal.
#[derive(Debug, Clone)]
pub struct CreateJournalInput {
    /// Owning business.
    pub business_id: Uuid,
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// Header description.
    pub description: String,
    /// Journal purpose.
    pub journal_type: CoreJournalType,
    /// Optional external reference.
    pub reference: Option<String>,
    /// Lines in display order.
    pub lines: Vec<JournalLine>,
    /// Author.
    pub created_by: Uuid,
}

/// Input for replacing a journal's header fields and lines.
#[derive(Debug, Clone)]
pub struct UpdateJournalInput {
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// Header description.
    pub description: String,
    /// Optional external reference.
    pub reference: Option<String>,
    /// Replacement lines; the old lines are discarded.
    pub lines: Vec<JournalLine>,
}

/// Filter options for listing journals.
#[derive(Debug, Clone, Default)]
pub struct JournalFilter {
    /// Only this journal type.
    pub journal_type: Option<JournalType>,
    /// Entry date on or after.
    pub date_from: Option<NaiveDate>,
    /// Entry date on or before.
    pub date_to: Option<NaiveDate>,
}

/// Journal with its lines ordered by line number.
#[derive(Debug, Clone)]
pub struct JournalWithLines {
    /// Journal header.
    pub entry: journal_entries::Model,
    /// Journal lines.
    pub lines: Vec<journal_details::Model>,
}

/// Journal repository.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a user journal.
    ///
    /// # Errors
    ///
    /// - `SystemJournal` for journal types only the system may create
    /// - any `validate_lines` failure
    /// - `AccountNotFound` if a line references an unknown account
    pub async fn create_journal(
        &self,
        input: CreateJournalInput,
    ) -> Result<JournalWithLines, PostingError> {
        if input.journal_type.is_system_generated() {
            return Err(JournalError::SystemJournal(input.journal_type).into());
        }
        validate_lines(&input.lines)?;

        let txn = self.db.begin().await?;
        let journal = insert_journal(&txn, &input).await?;
        txn.commit().await?;

        info!(
            business_id = %input.business_id,
            journal_id = %journal.entry.id,
            journal_type = %input.journal_type,
            lines = journal.lines.len(),
            "Journal created"
        );
        Ok(journal)
    }

    /// Replaces a journal's header fields and all of its lines.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the journal is not in the business
    /// - `SystemJournal` if the journal was generated by the system
    /// - any `validate_lines` failure, or `AccountNotFound`
    pub async fn update_journal(
        &self,
        business_id: Uuid,
        journal_id: Uuid,
        input: UpdateJournalInput,
    ) -> Result<JournalWithLines, PostingError> {
        validate_lines(&input.lines)?;

        let txn = self.db.begin().await?;
        let existing = find_journal_in(&txn, business_id, journal_id).await?;
        guard_user_journal(&existing)?;
        ensure_accounts(&txn, business_id, &input.lines).await?;

        let mut active: journal_entries::ActiveModel = existing.into();
        active.entry_date = Set(input.entry_date);
        active.description = Set(input.description);
        active.reference = Set(input.reference);
        active.updated_at = Set(Utc::now().into());
        let entry = active.update(&txn).await?;

        journal_details::Entity::delete_many()
            .filter(journal_details::Column::JournalEntryId.eq(journal_id))
            .exec(&txn)
            .await?;
        let lines = insert_details(&txn, journal_id, &input.lines).await?;

        txn.commit().await?;

        info!(%business_id, %journal_id, lines = lines.len(), "Journal updated");
        Ok(JournalWithLines { entry, lines })
    }

    /// Deletes a user journal and its lines.
    ///
    /// # Errors
    ///
    /// `NotFound`, or `SystemJournal` for system-generated journals.
    pub async fn delete_journal(
        &self,
        business_id: Uuid,
        journal_id: Uuid,
    ) -> Result<(), PostingError> {
        let txn = self.db.begin().await?;
        let existing = find_journal_in(&txn, business_id, journal_id).await?;
        guard_user_journal(&existing)?;

        journal_details::Entity::delete_many()
            .filter(journal_details::Column::JournalEntryId.eq(journal_id))
            .exec(&txn)
            .await?;
        journal_entries::Entity::delete_by_id(journal_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!(%business_id, %journal_id, "Journal deleted");
        Ok(())
    }

    /// Gets a journal with its lines.
    ///
    /// # Errors
    ///
    /// `NotFound` if the journal is not in the business.
    pub async fn get_journal(
        &self,
        business_id: Uuid,
        journal_id: Uuid,
    ) -> Result<JournalWithLines, PostingError> {
        let entry = find_journal_in(&self.db, business_id, journal_id).await?;
        let lines = journal_details::Entity::find()
            .filter(journal_details::Column::JournalEntryId.eq(journal_id))
            .order_by_asc(journal_details::Column::LineNumber)
            .all(&self.db)
            .await?;
        Ok(JournalWithLines { entry, lines })
    }

    /// Lists journal headers, newest entry date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_journals(
        &self,
        business_id: Uuid,
        filter: JournalFilter,
        page: PageRequest,
    ) -> Result<PageResponse<journal_entries::Model>, PostingError> {
        let page = page.normalized();
        let mut query = journal_entries::Entity::find()
            .filter(journal_entries::Column::BusinessId.eq(business_id));

        if let Some(journal_type) = filter.journal_type {
            query = query.filter(journal_entries::Column::JournalType.eq(journal_type));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(journal_entries::Column::EntryDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(journal_entries::Column::EntryDate.lte(to));
        }

        let total = query.clone().count(&self.db).await?;
        let entries = query
            .order_by_desc(journal_entries::Column::EntryDate)
            .order_by_desc(journal_entries::Column::CreatedAt)
            .order_by_desc(journal_entries::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(entries, page.page, page.per_page, total))
    }
}

/// Validates and inserts a journal with its lines on `conn`.
///
/// Callers own the transaction; nothing is committed here.
pub(crate) async fn insert_journal<C: ConnectionTrait>(
    conn: &C,
    input: &CreateJournalInput,
) -> Result<JournalWithLines, PostingError> {
    validate_lines(&input.lines)?;
    ensure_accounts(conn, input.business_id, &input.lines).await?;

    let now: DateTime<FixedOffset> = Utc::now().into();
    let entry = journal_entries::ActiveModel {
        id: Set(Uuid::now_v7()),
        business_id: Set(input.business_id),
        entry_date: Set(input.entry_date),
        description: Set(input.description.clone()),
        journal_type: Set(input.journal_type.into()),
        reference: Set(input.reference.clone()),
        created_by: Set(input.created_by),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;

    let lines = insert_details(conn, entry.id, &input.lines).await?;
    Ok(JournalWithLines { entry, lines })
}

async fn insert_details<C: ConnectionTrait>(
    conn: &C,
    journal_id: Uuid,
    lines: &[JournalLine],
) -> Result<Vec<journal_details::Model>, PostingError> {
    let mut inserted = Vec::with_capacity(lines.len());
    for (line_number, line) in (1..).zip(lines) {
        let detail = journal_details::ActiveModel {
            id: Set(Uuid::now_v7()),
            journal_entry_id: Set(journal_id),
            line_number: Set(line_number),
            account_id: Set(line.account_id.into_inner()),
            entry_type: Set(line.entry_type.into()),
            amount: Set(line.amount),
            memo: Set(line.memo.clone()),
        }
        .insert(conn)
        .await?;
        inserted.push(detail);
    }
    Ok(inserted)
}

async fn ensure_accounts<C: ConnectionTrait>(
    conn: &C,
    business_id: Uuid,
    lines: &[JournalLine],
) -> Result<(), PostingError> {
    let missing =
        find_missing_account(conn, business_id, lines.iter().map(|l| l.account_id.into_inner()))
            .await?;
    match missing {
        Some(id) => Err(JournalError::AccountNotFound(id).into()),
        None => Ok(()),
    }
}

async fn find_journal_in<C: ConnectionTrait>(
    conn: &C,
    business_id: Uuid,
    journal_id: Uuid,
) -> Result<journal_entries::Model, PostingError> {
    journal_entries::Entity::find_by_id(journal_id)
        .filter(journal_entries::Column::BusinessId.eq(business_id))
        .one(conn)
        .await?
        .ok_or_else(|| JournalError::NotFound(journal_id).into())
}

fn guard_user_journal(entry: &journal_entries::Model) -> Result<(), PostingError> {
    let journal_type: CoreJournalType = entry.journal_type.into();
    if journal_type.is_system_generated() {
        return Err(JournalError::SystemJournal(journal_type).into());
    }
    Ok(())
}
