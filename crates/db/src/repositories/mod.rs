//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod cash_disbursement;
pub mod depreciation;
pub mod finance_settings;
pub mod inventory;
pub mod journal;

pub use account::{AccountError, AccountRepository, CreateAccountInput};
pub use cash_disbursement::{
    CashDisbursementInput, CashDisbursementRepository, DisbursementError, ExpenseLine,
};
pub use depreciation::{
    DepreciationRepository, DepreciationRunError, RegisterAssetInput, RegisteredAsset,
};
pub use finance_settings::{
    FinanceSettingsError, FinanceSettingsRepository, UpdateFinanceSettingsInput,
};
pub use inventory::{
    CreateItemInput, InventoryRepository, LedgerFilter, LowStockItem, StockError, StockInInput,
    StockOutInput, StockOutResult,
};
pub use journal::{
    CreateJournalInput, JournalFilter, JournalRepository, JournalWithLines, PostingError,
    UpdateJournalInput,
};
