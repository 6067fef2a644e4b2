//! Finance settings types.

use backoffice_shared::types::{AccountId, BusinessId};
use serde::{Deserialize, Serialize};

use super::error::SettingsError;

/// Default accounts a business can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultAccount {
    /// Cash or bank account used by disbursements.
    Cash,
    /// Accounts receivable.
    Receivable,
    /// Accounts payable.
    Payable,
}

impl std::fmt::Display for DefaultAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Cash => "cash",
            Self::Receivable => "receivable",
            Self::Payable => "payable",
        })
    }
}

/// Per-business default accounts. A missing settings row behaves as
/// `FinanceSettings::unset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceSettings {
    /// Owning business.
    pub business_id: BusinessId,
    /// Default cash account.
    pub default_cash_account_id: Option<AccountId>,
    /// Default accounts receivable.
    pub default_receivable_account_id: Option<AccountId>,
    /// Default accounts payable.
    pub default_payable_account_id: Option<AccountId>,
}

impl FinanceSettings {
    /// Settings with nothing configured.
    #[must_use]
    pub const fn unset(business_id: BusinessId) -> Self {
        Self {
            business_id,
            default_cash_account_id: None,
            default_receivable_account_id: None,
            default_payable_account_id: None,
        }
    }

    /// Configured account of the given kind, if any.
    #[must_use]
    pub const fn account(&self, kind: DefaultAccount) -> Option<AccountId> {
        match kind {
            DefaultAccount::Cash => self.default_cash_account_id,
            DefaultAccount::Receivable => self.default_receivable_account_id,
            DefaultAccount::Payable => self.default_payable_account_id,
        }
    }

    /// Whether a default cash account is set.
    #[must_use]
    pub const fn is_default_cash_account_set(&self) -> bool {
        self.default_cash_account_id.is_some()
    }

    /// Whether a default receivable account is set.
    #[must_use]
    pub const fn is_default_receivable_account_set(&self) -> bool {
        self.default_receivable_account_id.is_some()
    }

    /// Whether a default payable account is set.
    #[must_use]
    pub const fn is_default_payable_account_set(&self) -> bool {
        self.default_payable_account_id.is_some()
    }

    /// Returns the configured account or a configuration error.
    ///
    /// # Errors
    ///
    /// `NotConfigured(kind)` when the account is not set.
    pub const fn require(&self, kind: DefaultAccount) -> Result<AccountId, SettingsError> {
        match self.account(kind) {
            Some(id) => Ok(id),
            None => Err(SettingsError::NotConfigured(kind)),
        }
    }
}
