//! Account repository for chart of accounts lookups.
//!
//! Journals, finance settings, and depreciation settings all reference
//! accounts by id. Every reference is checked for existence within the
//! business before it is written.

use std::collections::BTreeSet;

use backoffice_shared::AppError;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use crate::entities::{chart_of_accounts, sea_orm_active_enums::AccountType};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists in the business.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::DuplicateCode(_) => Self::Conflict(err.to_string()),
            AccountError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            AccountError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Owning business.
    pub business_id: Uuid,
    /// Account code, unique per business.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Classification.
    pub account_type: AccountType,
}

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// `DuplicateCode` if the code is taken in the business, including when a
    /// concurrent insert wins the unique index.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        let existing = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::BusinessId.eq(input.business_id))
            .filter(chart_of_accounts::Column::Code.eq(&input.code))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        insert_account(&self.db, input).await
    }

    /// Gets an account of the business.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if it does not exist in the business.
    pub async fn get_account(
        &self,
        business_id: Uuid,
        account_id: Uuid,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        chart_of_accounts::Entity::find_by_id(account_id)
            .filter(chart_of_accounts::Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await?
            .ok_or(AccountError::AccountNotFound(account_id))
    }

    /// Lists the business's accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_accounts(
        &self,
        business_id: Uuid,
        account_type: Option<AccountType>,
    ) -> Result<Vec<chart_of_accounts::Model>, AccountError> {
        let mut query = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::BusinessId.eq(business_id));
        if let Some(account_type) = account_type {
            query = query.filter(chart_of_accounts::Column::AccountType.eq(account_type));
        }
        Ok(query
            .order_by_asc(chart_of_accounts::Column::Code)
            .all(&self.db)
            .await?)
    }
}

/// Returns the first of `account_ids` that does not exist in the business.
///
/// Runs on any connection so transactional flows can check inside their
/// own transaction.
pub(crate) async fn find_missing_account<C: ConnectionTrait>(
    conn: &C,
    business_id: Uuid,
    account_ids: impl IntoIterator<Item = Uuid>,
) -> Result<Option<Uuid>, DbErr> {
    let wanted: BTreeSet<Uuid> = account_ids.into_iter().collect();
    if wanted.is_empty() {
        return Ok(None);
    }

    let found: BTreeSet<Uuid> = chart_of_accounts::Entity::find()
        .select_only()
        .column(chart_of_accounts::Column::Id)
        .filter(chart_of_accounts::Column::BusinessId.eq(business_id))
        .filter(chart_of_accounts::Column::Id.is_in(wanted.iter().copied()))
        .into_tuple::<Uuid>()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    Ok(wanted.into_iter().find(|id| !found.contains(id)))
}

async fn insert_account<C: ConnectionTrait>(
    conn: &C,
    input: CreateAccountInput,
) -> Result<chart_of_accounts::Model, AccountError> {
    let code = input.code.clone();
    chart_of_accounts::ActiveModel {
        id: Set(Uuid::now_v7()),
        business_id: Set(input.business_id),
        code: Set(input.code),
        name: Set(input.name),
        account_type: Set(input.account_type),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await
    .map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AccountError::DuplicateCode(code),
        _ => err.into(),
    })
}
