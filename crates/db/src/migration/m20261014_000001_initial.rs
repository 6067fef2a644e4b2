//! Initial database migration.
//!
//! Creates the inventory, journal, depreciation, and finance settings tables
//! together with the constraint triggers that guard their invariants.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(CHART_OF_ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 2: INVENTORY
        // ============================================================
        db.execute_unprepared(INVENTORY_ITEMS_SQL).await?;
        db.execute_unprepared(INVENTORY_BATCHES_SQL).await?;
        db.execute_unprepared(INVENTORY_LEDGERS_SQL).await?;

        // ============================================================
        // PART 3: JOURNALS
        // ============================================================
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_DETAILS_SQL).await?;

        // ============================================================
        // PART 4: FIXED ASSETS & DEPRECIATION
        // ============================================================
        db.execute_unprepared(FIXED_ASSETS_SQL).await?;
        db.execute_unprepared(DEPRECIATION_SETTINGS_SQL).await?;
        db.execute_unprepared(DEPRECIATION_SCHEDULES_SQL).await?;

        // ============================================================
        // PART 5: FINANCE SETTINGS
        // ============================================================
        db.execute_unprepared(FINANCE_SETTINGS_SQL).await?;

        // ============================================================
        // PART 6: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const CHART_OF_ACCOUNTS_SQL: &str = r"
CREATE TABLE chart_of_accounts (
    id UUID PRIMARY KEY,
    business_id UUID NOT NULL,
    code VARCHAR(20) NOT NULL,
    name VARCHAR(255) NOT NULL,
    account_type VARCHAR(16) NOT NULL
        CHECK (account_type IN ('ASSET', 'LIABILITY', 'EQUITY', 'REVENUE', 'EXPENSE')),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (business_id, code)
);

CREATE INDEX idx_coa_business ON chart_of_accounts(business_id) WHERE is_active = true;
";

const INVENTORY_ITEMS_SQL: &str = r"
CREATE TABLE inventory_items (
    id UUID PRIMARY KEY,
    business_id UUID NOT NULL,
    sku VARCHAR(64) NOT NULL,
    name VARCHAR(255) NOT NULL,
    reorder_level INTEGER NOT NULL DEFAULT 0 CHECK (reorder_level >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (business_id, sku)
);
";

const INVENTORY_BATCHES_SQL: &str = r"
CREATE TABLE inventory_batches (
    id UUID PRIMARY KEY,
    business_id UUID NOT NULL,
    item_id UUID NOT NULL REFERENCES inventory_items(id) ON DELETE RESTRICT,
    quantity_received INTEGER NOT NULL CHECK (quantity_received > 0),
    current_quantity INTEGER NOT NULL,
    unit_cost NUMERIC(19, 4) NOT NULL CHECK (unit_cost >= 0),
    received_date DATE NOT NULL,
    expiration_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_batch_quantity CHECK (
        current_quantity >= 0 AND current_quantity <= quantity_received
    ),
    CONSTRAINT chk_batch_expiration CHECK (
        expiration_date IS NULL OR expiration_date >= received_date
    )
);

-- FIFO scan: oldest batches with stock first
CREATE INDEX idx_batches_fifo ON inventory_batches(item_id, received_date, id)
    WHERE current_quantity > 0;
CREATE INDEX idx_batches_business ON inventory_batches(business_id);
";

const INVENTORY_LEDGERS_SQL: &str = r"
CREATE TABLE inventory_ledgers (
    id UUID PRIMARY KEY,
    business_id UUID NOT NULL,
    item_id UUID NOT NULL REFERENCES inventory_items(id) ON DELETE RESTRICT,
    batch_id UUID REFERENCES inventory_batches(id) ON DELETE RESTRICT,
    movement_type VARCHAR(16) NOT NULL
        CHECK (movement_type IN ('STOCK_IN', 'STOCK_OUT', 'ADJUSTMENT')),
    quantity INTEGER NOT NULL,
    unit_cost NUMERIC(19, 4),
    issued_to VARCHAR(255),
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_ledger_sign CHECK (
        (movement_type = 'STOCK_IN' AND quantity > 0) OR
        (movement_type = 'STOCK_OUT' AND quantity < 0) OR
        (movement_type = 'ADJUSTMENT' AND quantity <> 0)
    )
);

CREATE INDEX idx_inv_ledgers_item ON inventory_ledgers(business_id, item_id, created_at DESC);
CREATE INDEX idx_inv_ledgers_batch ON inventory_ledgers(batch_id) WHERE batch_id IS NOT NULL;
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    business_id UUID NOT NULL,
    entry_date DATE NOT NULL,
    description TEXT NOT NULL,
    journal_type VARCHAR(32) NOT NULL CHECK (journal_type IN (
        'GENERAL', 'SHIFTING', 'OPENING_BALANCE', 'DEPRECIATION', 'CASH_DISBURSEMENT'
    )),
    reference VARCHAR(100),
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_journals_business_date ON journal_entries(business_id, entry_date DESC);
CREATE INDEX idx_journals_type ON journal_entries(business_id, journal_type);
";

const JOURNAL_DETAILS_SQL: &str = r"
CREATE TABLE journal_details (
    id UUID PRIMARY KEY,
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    line_number INTEGER NOT NULL CHECK (line_number > 0),
    account_id UUID NOT NULL REFERENCES chart_of_accounts(id),
    entry_type VARCHAR(8) NOT NULL CHECK (entry_type IN ('DEBIT', 'CREDIT')),
    amount NUMERIC(19, 4) NOT NULL CHECK (amount > 0),
    memo TEXT,
    UNIQUE (journal_entry_id, line_number)
);

CREATE INDEX idx_journal_details_account ON journal_details(account_id);
";

const FIXED_ASSETS_SQL: &str = r"
CREATE TABLE fixed_assets (
    id UUID PRIMARY KEY,
    business_id UUID NOT NULL,
    name VARCHAR(255) NOT NULL,
    acquisition_date DATE NOT NULL,
    acquisition_cost NUMERIC(19, 4) NOT NULL CHECK (acquisition_cost >= 0),
    salvage_value NUMERIC(19, 4) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_salvage CHECK (salvage_value >= 0 AND salvage_value <= acquisition_cost)
);

CREATE INDEX idx_fixed_assets_business ON fixed_assets(business_id);
";

const DEPRECIATION_SETTINGS_SQL: &str = r"
CREATE TABLE depreciation_settings (
    id UUID PRIMARY KEY,
    fixed_asset_id UUID NOT NULL UNIQUE REFERENCES fixed_assets(id) ON DELETE CASCADE,
    useful_life_months INTEGER NOT NULL CHECK (useful_life_months > 0),
    expense_account_id UUID NOT NULL REFERENCES chart_of_accounts(id),
    accumulated_depreciation_account_id UUID NOT NULL REFERENCES chart_of_accounts(id)
);
";

const DEPRECIATION_SCHEDULES_SQL: &str = r"
CREATE TABLE depreciation_schedules (
    id UUID PRIMARY KEY,
    fixed_asset_id UUID NOT NULL REFERENCES fixed_assets(id) ON DELETE CASCADE,
    depreciation_date DATE NOT NULL,
    depreciation_amount NUMERIC(19, 4) NOT NULL CHECK (depreciation_amount > 0),
    status VARCHAR(16) NOT NULL DEFAULT 'PENDING' CHECK (status IN ('PENDING', 'POSTED')),
    -- Back-reference only, no foreign key
    posted_journal_entry_id UUID,
    posted_at TIMESTAMPTZ,

    CONSTRAINT chk_posted_link CHECK (
        (status = 'PENDING' AND posted_journal_entry_id IS NULL) OR
        (status = 'POSTED' AND posted_journal_entry_id IS NOT NULL)
    )
);

CREATE INDEX idx_schedules_pending ON depreciation_schedules(depreciation_date)
    WHERE status = 'PENDING';
CREATE INDEX idx_schedules_asset ON depreciation_schedules(fixed_asset_id, depreciation_date);
";

const FINANCE_SETTINGS_SQL: &str = r"
CREATE TABLE finance_settings (
    id UUID PRIMARY KEY,
    business_id UUID NOT NULL UNIQUE,
    default_cash_account_id UUID REFERENCES chart_of_accounts(id),
    default_receivable_account_id UUID REFERENCES chart_of_accounts(id),
    default_payable_account_id UUID REFERENCES chart_of_accounts(id),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: check_journal_balance
-- Ensures debit = credit for every journal at commit time
-- ============================================================
CREATE OR REPLACE FUNCTION check_journal_balance()
RETURNS TRIGGER AS $$
DECLARE
    total_debit NUMERIC(19, 4);
    total_credit NUMERIC(19, 4);
BEGIN
    SELECT
        COALESCE(SUM(amount) FILTER (WHERE entry_type = 'DEBIT'), 0),
        COALESCE(SUM(amount) FILTER (WHERE entry_type = 'CREDIT'), 0)
    INTO total_debit, total_credit
    FROM journal_details
    WHERE journal_entry_id = NEW.journal_entry_id;

    IF total_debit <> total_credit THEN
        RAISE EXCEPTION 'Journal is not balanced. Debit: %, Credit: %',
            total_debit, total_credit;
    END IF;

    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE CONSTRAINT TRIGGER trg_check_journal_balance
AFTER INSERT OR UPDATE ON journal_details
DEFERRABLE INITIALLY DEFERRED
FOR EACH ROW
EXECUTE FUNCTION check_journal_balance();

-- ============================================================
-- FUNCTION: prevent_inventory_ledger_modification
-- Inventory ledger is append-only
-- ============================================================
CREATE OR REPLACE FUNCTION prevent_inventory_ledger_modification()
RETURNS TRIGGER AS $$
BEGIN
    RAISE EXCEPTION 'Inventory ledger entries are append-only';
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_inventory_ledger_append_only
BEFORE UPDATE OR DELETE ON inventory_ledgers
FOR EACH ROW
EXECUTE FUNCTION prevent_inventory_ledger_modification();

-- ============================================================
-- FUNCTION: prevent_batch_increase
-- current_quantity never goes up after stock-in
-- ============================================================
CREATE OR REPLACE FUNCTION prevent_batch_increase()
RETURNS TRIGGER AS $$
BEGIN
    IF NEW.current_quantity > OLD.current_quantity THEN
        RAISE EXCEPTION 'Batch % quantity cannot increase', OLD.id;
    END IF;
    IF NEW.quantity_received <> OLD.quantity_received THEN
        RAISE EXCEPTION 'Batch % quantity_received is immutable', OLD.id;
    END IF;
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_batch_monotonic
BEFORE UPDATE ON inventory_batches
FOR EACH ROW
EXECUTE FUNCTION prevent_batch_increase();

-- ============================================================
-- FUNCTION: prevent_posted_schedule_modification
-- POSTED schedules are terminal
-- ============================================================
CREATE OR REPLACE FUNCTION prevent_posted_schedule_modification()
RETURNS TRIGGER AS $$
BEGIN
    IF OLD.status = 'POSTED' THEN
        RAISE EXCEPTION 'Depreciation schedule % is already posted', OLD.id;
    END IF;
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_schedule_posted_immutable
BEFORE UPDATE ON depreciation_schedules
FOR EACH ROW
EXECUTE FUNCTION prevent_posted_schedule_modification();
";

const DROP_ALL_SQL: &str = r"
-- ============================================================
-- DROP ALL: Rollback migration
-- Order matters due to foreign key constraints
-- ============================================================

-- Drop triggers
DROP TRIGGER IF EXISTS trg_schedule_posted_immutable ON depreciation_schedules;
DROP TRIGGER IF EXISTS trg_batch_monotonic ON inventory_batches;
DROP TRIGGER IF EXISTS trg_inventory_ledger_append_only ON inventory_ledgers;
DROP TRIGGER IF EXISTS trg_check_journal_balance ON journal_details;

-- Drop functions
DROP FUNCTION IF EXISTS prevent_posted_schedule_modification();
DROP FUNCTION IF EXISTS prevent_batch_increase();
DROP FUNCTION IF EXISTS prevent_inventory_ledger_modification();
DROP FUNCTION IF EXISTS check_journal_balance();

-- Drop tables (reverse order of creation)
DROP TABLE IF EXISTS finance_settings CASCADE;
DROP TABLE IF EXISTS depreciation_schedules CASCADE;
DROP TABLE IF EXISTS depreciation_settings CASCADE;
DROP TABLE IF EXISTS fixed_assets CASCADE;
DROP TABLE IF EXISTS journal_details CASCADE;
DROP TABLE IF EXISTS journal_entries CASCADE;
DROP TABLE IF EXISTS inventory_ledgers CASCADE;
DROP TABLE IF EXISTS inventory_batches CASCADE;
DROP TABLE IF EXISTS inventory_items CASCADE;
DROP TABLE IF EXISTS chart_of_accounts CASCADE;
";
