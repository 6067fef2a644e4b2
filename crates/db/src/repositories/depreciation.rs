//! Depreciation repository: asset registration and the monthly posting run.
//!
//! The run posts one consolidated DEPRECIATION journal per account pair.
//! Each group commits on its own; a group whose schedules were already
//! posted by a concurrent run is skipped.

use std::collections::{BTreeSet, HashMap};

use backoffice_core::depreciation::{
    AccountPair, AssetTerms, DepreciationError, DepreciationRunSummary, PendingSchedule,
    PostingGroup, group_by_account_pair, straight_line_schedule,
};
use backoffice_core::journal::JournalType;
use backoffice_shared::AppError;
use backoffice_shared::types::{AccountId, DepreciationScheduleId, FixedAssetId};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::account::find_missing_account;
use super::journal::{CreateJournalInput, PostingError, insert_journal, journal_error_to_app};
use crate::entities::{
    depreciation_schedules, depreciation_settings, fixed_assets,
    sea_orm_active_enums::ScheduleStatus,
};

/// Error types for depreciation operations.
#[derive(Debug, thiserror::Error)]
pub enum DepreciationRunError {
    /// Depreciation rule violated.
    #[error(transparent)]
    Depreciation(#[from] DepreciationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PostingError> for DepreciationRunError {
    fn from(err: PostingError) -> Self {
        match err {
            PostingError::Journal(e) => Self::Depreciation(e.into()),
            PostingError::Database(e) => Self::Database(e),
        }
    }
}

impl DepreciationRunError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Depreciation(e) => e.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Depreciation(e) => e.http_status_code(),
            Self::Database(_) => 500,
        }
    }
}

impl From<DepreciationRunError> for AppError {
    fn from(err: DepreciationRunError) -> Self {
        match err {
            DepreciationRunError::Depreciation(DepreciationError::Journal(e)) => {
                journal_error_to_app(&e)
            }
            DepreciationRunError::Depreciation(e) => match e.http_status_code() {
                404 => Self::NotFound(e.to_string()),
                422 => Self::Configuration(e.to_string()),
                _ => Self::Validation(e.to_string()),
            },
            DepreciationRunError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for registering a depreciable asset.
#[derive(Debug, Clone)]
pub struct RegisterAssetInput {
    /// Owning business.
    pub business_id: Uuid,
    /// Asset name.
    pub name: String,
    /// Acquisition date.
    pub acquisition_date: NaiveDate,
    /// Cost at acquisition.
    pub acquisition_cost: Decimal,
    /// Residual value.
    pub salvage_value: Decimal,
    /// Useful life in months.
    pub useful_life_months: i32,
    /// First depreciation month; defaults to the acquisition month.
    pub depreciation_start: Option<NaiveDate>,
    /// Expense account debited each period.
    pub expense_account_id: Uuid,
    /// Accumulated depreciation account credited each period.
    pub accumulated_depreciation_account_id: Uuid,
}

/// Asset with its setting and generated schedule.
#[derive(Debug, Clone)]
pub struct RegisteredAsset {
    /// Asset row.
    pub asset: fixed_assets::Model,
    /// Depreciation setting.
    pub setting: depreciation_settings::Model,
    /// PENDING schedule rows by date.
    pub schedules: Vec<depreciation_schedules::Model>,
}

/// Depreciation repository.
#[derive(Debug, Clone)]
pub struct DepreciationRepository {
    db: DatabaseConnection,
}

impl DepreciationRepository {
    /// Creates a new depreciation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers an asset, its setting, and a straight-line schedule.
    ///
    /// # Errors
    ///
    /// - invalid terms (useful life, cost, salvage)
    /// - `AccountNotFound` if either account is not in the business
    pub async fn register_asset(
        &self,
        input: RegisterAssetInput,
    ) -> Result<RegisteredAsset, DepreciationRunError> {
        let terms = AssetTerms {
            acquisition_cost: input.acquisition_cost,
            salvage_value: input.salvage_value,
            useful_life_months: input.useful_life_months,
            start_date: input.depreciation_start.unwrap_or(input.acquisition_date),
        };
        let planned = straight_line_schedule(&terms)?;

        let txn = self.db.begin().await?;

        let accounts = [
            input.expense_account_id,
            input.accumulated_depreciation_account_id,
        ];
        if let Some(missing) = find_missing_account(&txn, input.business_id, accounts).await? {
            return Err(DepreciationError::AccountNotFound(missing).into());
        }

        let now: DateTime<FixedOffset> = Utc::now().into();
        let asset = fixed_assets::ActiveModel {
            id: Set(Uuid::now_v7()),
            business_id: Set(input.business_id),
            name: Set(input.name),
            acquisition_date: Set(input.acquisition_date),
            acquisition_cost: Set(input.acquisition_cost),
            salvage_value: Set(input.salvage_value),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let setting = depreciation_settings::ActiveModel {
            id: Set(Uuid::now_v7()),
            fixed_asset_id: Set(asset.id),
            useful_life_months: Set(input.useful_life_months),
            expense_account_id: Set(input.expense_account_id),
            accumulated_depreciation_account_id: Set(input.accumulated_depreciation_account_id),
        }
        .insert(&txn)
        .await?;

        let mut schedules = Vec::with_capacity(planned.len());
        for period in &planned {
            let row = depreciation_schedules::ActiveModel {
                id: Set(Uuid::now_v7()),
                fixed_asset_id: Set(asset.id),
                depreciation_date: Set(period.depreciation_date),
                depreciation_amount: Set(period.amount),
                status: Set(ScheduleStatus::Pending),
                posted_journal_entry_id: Set(None),
                posted_at: Set(None),
            }
            .insert(&txn)
            .await?;
            schedules.push(row);
        }

        txn.commit().await?;

        info!(
            business_id = %input.business_id,
            asset_id = %asset.id,
            periods = schedules.len(),
            "Fixed asset registered"
        );
        Ok(RegisteredAsset {
            asset,
            setting,
            schedules,
        })
    }

    /// PENDING schedules of the business due on or before `period_date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn pending_schedules(
        &self,
        business_id: Uuid,
        period_date: NaiveDate,
    ) -> Result<Vec<depreciation_schedules::Model>, DepreciationRunError> {
        Ok(depreciation_schedules::Entity::find()
            .join(
                JoinType::InnerJoin,
                depreciation_schedules::Relation::FixedAssets.def(),
            )
            .filter(fixed_assets::Column::BusinessId.eq(business_id))
            .filter(depreciation_schedules::Column::Status.eq(ScheduleStatus::Pending))
            .filter(depreciation_schedules::Column::DepreciationDate.lte(period_date))
            .order_by_asc(depreciation_schedules::Column::DepreciationDate)
            .order_by_asc(depreciation_schedules::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Posts every due PENDING schedule, one journal per account pair.
    ///
    /// Running it again for the same period posts nothing new.
    ///
    /// # Errors
    ///
    /// - `SettingNotFound` if a due schedule's asset has no setting; nothing is posted
    /// - database failures; groups committed before the failure stay posted
    pub async fn run_monthly_depreciation(
        &self,
        business_id: Uuid,
        period_date: NaiveDate,
        posted_by: Uuid,
    ) -> Result<DepreciationRunSummary, DepreciationRunError> {
        let due = self.pending_schedules(business_id, period_date).await?;
        if due.is_empty() {
            info!(%business_id, %period_date, "No pending depreciation");
            return Ok(DepreciationRunSummary::default());
        }

        let pending: Vec<PendingSchedule> = due.iter().map(to_pending).collect();
        let settings = self.account_pairs(&pending).await?;
        let groups = group_by_account_pair(&pending, &settings)?;

        let mut summary = DepreciationRunSummary::default();
        for group in groups {
            match self
                .post_group(business_id, period_date, posted_by, &group)
                .await?
            {
                Some((schedules, amount)) => summary.record(schedules, amount),
                None => warn!(
                    %business_id,
                    expense_account_id = %group.account_pair.expense_account_id,
                    "Depreciation group already posted, skipped"
                ),
            }
        }

        info!(
            %business_id,
            %period_date,
            journals = summary.journals_created,
            schedules = summary.schedules_posted,
            total = %summary.total_amount,
            "Depreciation run completed"
        );
        Ok(summary)
    }

    /// Schedules of an asset ordered by date.
    ///
    /// # Errors
    ///
    /// `AssetNotFound` if the asset is not in the business.
    pub async fn list_schedules(
        &self,
        business_id: Uuid,
        asset_id: Uuid,
    ) -> Result<Vec<depreciation_schedules::Model>, DepreciationRunError> {
        fixed_assets::Entity::find_by_id(asset_id)
            .filter(fixed_assets::Column::BusinessId.eq(business_id))
            .one(&self.db)
            .await?
            .ok_or(DepreciationError::AssetNotFound(asset_id))?;

        Ok(depreciation_schedules::Entity::find()
            .filter(depreciation_schedules::Column::FixedAssetId.eq(asset_id))
            .order_by_asc(depreciation_schedules::Column::DepreciationDate)
            .all(&self.db)
            .await?)
    }

    /// Account pair per asset for the given schedules.
    async fn account_pairs(
        &self,
        pending: &[PendingSchedule],
    ) -> Result<HashMap<FixedAssetId, AccountPair>, DepreciationRunError> {
        let asset_ids: BTreeSet<Uuid> = pending
            .iter()
            .map(|s| s.fixed_asset_id.into_inner())
            .collect();

        let rows = depreciation_settings::Entity::find()
            .filter(depreciation_settings::Column::FixedAssetId.is_in(asset_ids))
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|s| {
                (
                    FixedAssetId::from_uuid(s.fixed_asset_id),
                    AccountPair {
                        expense_account_id: AccountId::from_uuid(s.expense_account_id),
                        accumulated_account_id: AccountId::from_uuid(
                            s.accumulated_depreciation_account_id,
                        ),
                    },
                )
            })
            .collect())
    }

    /// Posts one group in its own transaction.
    ///
    /// Returns `None` when none of the group's schedules are still PENDING.
    async fn post_group(
        &self,
        business_id: Uuid,
        period_date: NaiveDate,
        posted_by: Uuid,
        group: &PostingGroup,
    ) -> Result<Option<(u32, Decimal)>, DepreciationRunError> {
        let ids: Vec<Uuid> = group
            .schedule_ids()
            .into_iter()
            .map(DepreciationScheduleId::into_inner)
            .collect();

        let txn = self.db.begin().await?;

        let locked = depreciation_schedules::Entity::find()
            .filter(depreciation_schedules::Column::Id.is_in(ids))
            .filter(depreciation_schedules::Column::Status.eq(ScheduleStatus::Pending))
            .order_by_asc(depreciation_schedules::Column::DepreciationDate)
            .order_by_asc(depreciation_schedules::Column::Id)
            .lock_exclusive()
            .all(&txn)
            .await?;

        if locked.is_empty() {
            return Ok(None);
        }

        let schedules: Vec<PendingSchedule> = locked.iter().map(to_pending).collect();
        let total: Decimal = schedules.iter().map(|s| s.amount).sum();
        let posting = PostingGroup {
            account_pair: group.account_pair,
            schedules,
            total,
        };

        let journal = insert_journal(
            &txn,
            &CreateJournalInput {
                business_id,
                entry_date: period_date,
                description: format!("Depreciation for {}", period_date.format("%B %Y")),
                journal_type: JournalType::Depreciation,
                reference: Some(format!("DEP-{}", period_date.format("%Y%m"))),
                lines: posting.journal_lines(),
                created_by: posted_by,
            },
        )
        .await?;

        let now: DateTime<FixedOffset> = Utc::now().into();
        let posted_ids: Vec<Uuid> = locked.iter().map(|s| s.id).collect();
        let updated = depreciation_schedules::Entity::update_many()
            .set(depreciation_schedules::ActiveModel {
                status: Set(ScheduleStatus::Posted),
                posted_journal_entry_id: Set(Some(journal.entry.id)),
                posted_at: Set(Some(now)),
                ..Default::default()
            })
            .filter(depreciation_schedules::Column::Id.is_in(posted_ids))
            .filter(depreciation_schedules::Column::Status.eq(ScheduleStatus::Pending))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        let count = u32::try_from(updated.rows_affected).unwrap_or(u32::MAX);
        info!(
            %business_id,
            journal_id = %journal.entry.id,
            schedules = count,
            %total,
            "Depreciation group posted"
        );
        Ok(Some((count, total)))
    }
}

fn to_pending(row: &depreciation_schedules::Model) -> PendingSchedule {
    PendingSchedule {
        schedule_id: DepreciationScheduleId::from_uuid(row.id),
        fixed_asset_id: FixedAssetId::from_uuid(row.fixed_asset_id),
        depreciation_date: row.depreciation_date,
        amount: row.depreciation_amount,
    }
}
