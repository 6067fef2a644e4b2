//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

#[cfg(test)]
mod testing;

pub use repositories::{
    AccountRepository, CashDisbursementRepository, DepreciationRepository,
    FinanceSettingsRepository, InventoryRepository, JournalRepository,
};

use std::time::Duration;

use backoffice_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(config.sqlx_logging);

    let db = Database::connect(options).await?;
    tracing::info!(
        max_connections = config.max_connections,
        "Database connection pool established"
    );
    Ok(db)
}
