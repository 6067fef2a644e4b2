//! In-memory SQLite database for repository unit tests.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

/// Empty in-memory database. One connection, so the database lives as long
/// as the pool and transactions serialize.
pub(crate) async fn sqlite() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(options)
        .await
        .expect("Failed to open in-memory SQLite")
}

pub(crate) async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) {
    let backend = db.get_database_backend();
    let stmt = Schema::new(backend).create_table_from_entity(entity);
    db.execute(backend.build(&stmt))
        .await
        .expect("Failed to create table");
}

/// Composite unique constraint matching the migration's `UNIQUE (...)`.
pub(crate) async fn create_unique_index(db: &DatabaseConnection, table: &str, columns: &[&str]) {
    let sql = format!(
        "CREATE UNIQUE INDEX uq_{table}_{} ON {table} ({})",
        columns.join("_"),
        columns.join(", ")
    );
    db.execute_unprepared(&sql)
        .await
        .expect("Failed to create unique index");
}
