//! Depreciation error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::journal::JournalError;

/// Errors from asset setup and the depreciation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepreciationError {
    /// Useful life must be at least one month.
    #[error("Useful life must be greater than zero months, got {0}")]
    InvalidUsefulLife(i32),

    /// Acquisition cost cannot be negative.
    #[error("Acquisition cost cannot be negative, got {0}")]
    NegativeCost(Decimal),

    /// Salvage value must lie within 0..=cost.
    #[error("Salvage value {salvage} must be between 0 and acquisition cost {cost}")]
    InvalidSalvageValue {
        /// Acquisition cost.
        cost: Decimal,
        /// Salvage value supplied.
        salvage: Decimal,
    },

    /// A schedule date would fall outside the supported calendar.
    #[error("Depreciation date out of range")]
    DateOutOfRange,

    /// Fixed asset not found in the business.
    #[error("Fixed asset not found: {0}")]
    AssetNotFound(Uuid),

    /// Account not found in the business chart of accounts.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// A pending schedule belongs to an asset with no depreciation setting.
    #[error("No depreciation setting for fixed asset {0}")]
    SettingNotFound(Uuid),

    /// Generated journal failed validation.
    #[error(transparent)]
    Journal(#[from] JournalError),
}

impl DepreciationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUsefulLife(_) => "INVALID_USEFUL_LIFE",
            Self::NegativeCost(_) => "NEGATIVE_COST",
            Self::InvalidSalvageValue { .. } => "INVALID_SALVAGE_VALUE",
            Self::DateOutOfRange => "DATE_OUT_OF_RANGE",
            Self::AssetNotFound(_) => "ASSET_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::SettingNotFound(_) => "DEPRECIATION_SETTING_NOT_FOUND",
            Self::Journal(e) => e.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidUsefulLife(_)
            | Self::NegativeCost(_)
            | Self::InvalidSalvageValue { .. }
            | Self::DateOutOfRange => 400,
            Self::AssetNotFound(_) | Self::AccountNotFound(_) => 404,
            Self::SettingNotFound(_) => 422,
            Self::Journal(e) => e.http_status_code(),
        }
    }
}
