//! Finance settings repository: per-business default accounts.
//!
//! A missing settings row means nothing is configured.

use backoffice_core::settings::{DefaultAccount, FinanceSettings, SettingsError};
use backoffice_shared::AppError;
use backoffice_shared::types::{AccountId, BusinessId};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::account::find_missing_account;
use crate::entities::finance_settings;

/// Error types for finance settings operations.
#[derive(Debug, thiserror::Error)]
pub enum FinanceSettingsError {
    /// Required default account not configured.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Referenced account not found in the business.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl FinanceSettingsError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Settings(e) => e.error_code(),
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Settings(e) => e.http_status_code(),
            Self::AccountNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }
}

impl From<FinanceSettingsError> for AppError {
    fn from(err: FinanceSettingsError) -> Self {
        match err {
            FinanceSettingsError::Settings(e) => Self::Configuration(e.to_string()),
            FinanceSettingsError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            FinanceSettingsError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Replacement values for a business's default accounts. `None` clears.
#[derive(Debug, Clone, Default)]
pub struct UpdateFinanceSettingsInput {
    /// Default cash account.
    pub default_cash_account_id: Option<Uuid>,
    /// Default accounts receivable.
    pub default_receivable_account_id: Option<Uuid>,
    /// Default accounts payable.
    pub default_payable_account_id: Option<Uuid>,
}

/// Finance settings repository.
#[derive(Debug, Clone)]
pub struct FinanceSettingsRepository {
    db: DatabaseConnection,
}

impl FinanceSettingsRepository {
    /// Creates a new finance settings repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Current settings, unset when the business has no row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get(&self, business_id: Uuid) -> Result<FinanceSettings, FinanceSettingsError> {
        Ok(load_settings(&self.db, business_id).await?)
    }

    /// Whether the default cash account is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn is_default_cash_account_set(
        &self,
        business_id: Uuid,
    ) -> Result<bool, FinanceSettingsError> {
        Ok(self.get(business_id).await?.is_default_cash_account_set())
    }

    /// Whether the default receivable account is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn is_default_receivable_account_set(
        &self,
        business_id: Uuid,
    ) -> Result<bool, FinanceSettingsError> {
        Ok(self.get(business_id).await?.is_default_receivable_account_set())
    }

    /// Whether the default payable account is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn is_default_payable_account_set(
        &self,
        business_id: Uuid,
    ) -> Result<bool, FinanceSettingsError> {
        Ok(self.get(business_id).await?.is_default_payable_account_set())
    }

    /// Configured account of `kind`.
    ///
    /// # Errors
    ///
    /// `Settings(NotConfigured)` if the account is not set.
    pub async fn require(
        &self,
        business_id: Uuid,
        kind: DefaultAccount,
    ) -> Result<Uuid, FinanceSettingsError> {
        let settings = self.get(business_id).await?;
        Ok(settings.require(kind)?.into_inner())
    }

    /// Creates or replaces the business's settings.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if any referenced account is not in the business.
    pub async fn update(
        &self,
        business_id: Uuid,
        input: UpdateFinanceSettingsInput,
    ) -> Result<FinanceSettings, FinanceSettingsError> {
        let txn = self.db.begin().await?;

        let referenced = [
            input.default_cash_account_id,
            input.default_receivable_account_id,
            input.default_payable_account_id,
        ];
        if let Some(missing) =
            find_missing_account(&txn, business_id, referenced.into_iter().flatten()).await?
        {
            return Err(FinanceSettingsError::AccountNotFound(missing));
        }

        let existing = finance_settings::Entity::find()
            .filter(finance_settings::Column::BusinessId.eq(business_id))
            .one(&txn)
            .await?;

        let row = match existing {
            Some(row) => {
                let mut active: finance_settings::ActiveModel = row.into();
                active.default_cash_account_id = Set(input.default_cash_account_id);
                active.default_receivable_account_id = Set(input.default_receivable_account_id);
                active.default_payable_account_id = Set(input.default_payable_account_id);
                active.updated_at = Set(Utc::now().into());
                active.update(&txn).await?
            }
            None => {
                finance_settings::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    business_id: Set(business_id),
                    default_cash_account_id: Set(input.default_cash_account_id),
                    default_receivable_account_id: Set(input.default_receivable_account_id),
                    default_payable_account_id: Set(input.default_payable_account_id),
                    updated_at: Set(Utc::now().into()),
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;

        let settings = to_domain(row);
        info!(
            %business_id,
            cash = settings.is_default_cash_account_set(),
            receivable = settings.is_default_receivable_account_set(),
            payable = settings.is_default_payable_account_set(),
            "Finance settings updated"
        );
        Ok(settings)
    }
}

/// Loads settings on any connection.
pub(crate) async fn load_settings<C: ConnectionTrait>(
    conn: &C,
    business_id: Uuid,
) -> Result<FinanceSettings, DbErr> {
    let row = finance_settings::Entity::find()
        .filter(finance_settings::Column::BusinessId.eq(business_id))
        .one(conn)
        .await?;

    Ok(row.map_or_else(
        || FinanceSettings::unset(BusinessId::from_uuid(business_id)),
        to_domain,
    ))
}

fn to_domain(row: finance_settings::Model) -> FinanceSettings {
    FinanceSettings {
        business_id: BusinessId::from_uuid(row.business_id),
        default_cash_account_id: row.default_cash_account_id.map(AccountId::from_uuid),
        default_receivable_account_id: row.default_receivable_account_id.map(AccountId::from_uuid),
        default_payable_account_id: row.default_payable_account_id.map(AccountId::from_uuid),
    }
}
