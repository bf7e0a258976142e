//! Database layer: SQLite pool management, migrations, models, and
//! repositories.
//!
//! The engine runs as a single-node shop-facing service, so the store is
//! SQLite in WAL mode. Every statement that guards a business invariant
//! (occupancy ceilings, status transitions, points idempotency) is a single
//! atomic read-modify-write; never a check followed by a separate write.

pub mod models;
pub mod repositories;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool for the given SQLite database path.
///
/// WAL mode with `busy_timeout` lets concurrent request handlers retry
/// write contention instead of failing immediately; foreign keys are
/// enforced on every connection.
pub async fn create_pool(db_path: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(5))
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Cheap connectivity check used at startup and by the health endpoint.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
