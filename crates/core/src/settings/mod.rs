//! Finance settings preconditions.
//!
//! Transaction-entry flows consult these before writing anything that
//! depends on a configured default account.

mod error;
mod types;

pub use error::SettingsError;
pub use types::{DefaultAccount, FinanceSettings};
