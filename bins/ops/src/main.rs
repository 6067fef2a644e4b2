//! Operations CLI for the back office.
//!
//! Usage:
//!   backoffice-ops depreciate --business <ID> --period 2025-01-31 --posted-by <ID>
//!   backoffice-ops low-stock --business <ID>
//!   backoffice-ops stock --business <ID> --item <ID>
//!   backoffice-ops ledger --business <ID> [--item <ID>] [--movement stock-out]
//!                         [--from DATE] [--to DATE]
//!
//! Configuration comes from `config/default.toml`, `config/{RUN_MODE}.toml`
//! and `BACKOFFICE__*` environment variables.

use anyhow::Context;
use backoffice_db::entities::sea_orm_active_enums::MovementType;
use backoffice_db::repositories::LedgerFilter;
use backoffice_db::{DepreciationRepository, InventoryRepository};
use backoffice_shared::config::LoggingConfig;
use backoffice_shared::types::PageRequest;
use backoffice_shared::{AppConfig, AppError};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "backoffice-ops", version, about = "Back office operations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Post every PENDING depreciation schedule due on or before the period date.
    Depreciate {
        #[arg(long)]
        business: Uuid,
        /// Period end date, e.g. 2025-01-31.
        #[arg(long)]
        period: NaiveDate,
        /// User recorded as the creator of the journals.
        #[arg(long)]
        posted_by: Uuid,
    },
    /// List items at or below their reorder level.
    LowStock {
        #[arg(long)]
        business: Uuid,
    },
    /// Show on-hand quantity and value of an item.
    Stock {
        #[arg(long)]
        business: Uuid,
        #[arg(long)]
        item: Uuid,
    },
    /// Print a page of the inventory ledger, newest first.
    Ledger {
        #[arg(long)]
        business: Uuid,
        #[arg(long)]
        item: Option<Uuid>,
        #[arg(long)]
        batch: Option<Uuid>,
        #[arg(long, value_enum)]
        movement: Option<Movement>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        per_page: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Movement {
    StockIn,
    StockOut,
    Adjustment,
}

impl From<Movement> for MovementType {
    fn from(value: Movement) -> Self {
        match value {
            Movement::StockIn => Self::StockIn,
            Movement::StockOut => Self::StockOut,
            Movement::Adjustment => Self::Adjustment,
        }
    }
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let db = backoffice_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    if let Err(err) = run(cli.command, db).await {
        error!(code = err.error_code(), error = %err, "Command failed");
        eprintln!(
            "Error: {}",
            err.public_message(!config.environment.is_production())
        );
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Command, db: DatabaseConnection) -> Result<(), AppError> {
    match command {
        Command::Depreciate {
            business,
            period,
            posted_by,
        } => {
            let summary = DepreciationRepository::new(db)
                .run_monthly_depreciation(business, period, posted_by)
                .await?;
            print_json(&summary)?;
        }
        Command::LowStock { business } => {
            let items = InventoryRepository::new(db)
                .items_below_reorder_level(business)
                .await?;
            info!(%business, count = items.len(), "Low stock report");
            for low in items {
                println!(
                    "{}\t{}\ton_hand={}\treorder_level={}",
                    low.item.sku, low.item.name, low.on_hand, low.item.reorder_level
                );
            }
        }
        Command::Stock { business, item } => {
            let level = InventoryRepository::new(db)
                .stock_summary(business, item)
                .await?;
            print_json(&level)?;
        }
        Command::Ledger {
            business,
            item,
            batch,
            movement,
            from,
            to,
            page,
            per_page,
        } => {
            let filter = LedgerFilter {
                item_id: item,
                batch_id: batch,
                movement_type: movement.map(Into::into),
                date_from: from,
                date_to: to,
            };
            let entries = InventoryRepository::new(db)
                .get_ledgers(business, filter, PageRequest::new(page, per_page))
                .await?;
            print_json(&entries)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    println!("{json}");
    Ok(())
}
