//! Settings error types.

use thiserror::Error;

use super::types::DefaultAccount;

/// Errors raised by the finance settings gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The business has not configured the required default account.
    #[error("Default {0} account is not configured")]
    NotConfigured(DefaultAccount),
}

impl SettingsError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured(DefaultAccount::Cash) => "DEFAULT_CASH_ACCOUNT_NOT_SET",
            Self::NotConfigured(DefaultAccount::Receivable) => "DEFAULT_RECEIVABLE_ACCOUNT_NOT_SET",
            Self::NotConfigured(DefaultAccount::Payable) => "DEFAULT_PAYABLE_ACCOUNT_NOT_SET",
        }
    }

    /// Configuration problems are neither bad input nor server faults.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        422
    }
}
