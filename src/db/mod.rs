//! Spreadsheet-style persistence for submissions, usage logs and admin accounts.
//!
//! Every sheet is a list of string rows addressed with `Sheet!A:H` notation.
//!
//! # Architecture
//!
//! - `sheet`: [`SheetRange`] parsing, the [`SheetStore`] trait and the sheet names
//! - `models`: Row model for the `sheet_rows` table
//! - `repository`: [`SheetRepository`], the SQLite-backed store
//! - `memory`: [`MemorySheets`], the in-process store for tests and demos
//! - Connection pooling with SQLite WAL mode and embedded migrations

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{PortalError, PortalResult};

mod memory;
pub mod models;
mod repository;
pub mod sheet;

pub use memory::MemorySheets;
pub use repository::SheetRepository;
pub use sheet::{SheetRange, SheetStore};

/// Creates a SQLite connection pool and brings the schema up to date.
///
/// # Configuration
///
/// - **WAL mode**: Concurrent readers during writes
/// - **Busy timeout**: 30 seconds to ride out lock contention
/// - **Max connections**: 5
///
/// # Example
///
/// ```no_run
/// use ceo_portal::db::{create_pool, SheetRepository};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool("sqlite:./ceo_portal.db").await?;
///     let store = SheetRepository::new(pool);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// Returns a store error if the URL is invalid, the connection fails, or
/// migrations cannot be applied.
pub async fn create_pool(database_url: &str) -> PortalResult<SqlitePool> {
    info!(database_url, "Connecting to database");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| {
            PortalError::store(
                format!("Failed to parse database URL: {database_url}"),
                Some(Box::new(e)),
            )
        })?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(30));

    // In-memory databases are per connection, so they get exactly one.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .map_err(|e| {
            PortalError::store(
                format!("Failed to connect to database at {database_url}"),
                Some(Box::new(e)),
            )
        })?;

    info!("Running database migrations");
    run_migrations(&pool).await?;
    verify_database(&pool).await?;
    info!("Database migrations complete");

    Ok(pool)
}

/// Applies pending migrations from `migrations/`.
///
/// # Errors
///
/// Returns a store error when a migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> PortalResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| PortalError::store("Failed to run database migrations", Some(Box::new(e))))?;

    Ok(())
}

/// Verify that required tables exist after migrations.
///
/// # Errors
///
/// Returns a store error when the `sheet_rows` table is missing.
pub async fn verify_database(pool: &SqlitePool) -> PortalResult<()> {
    let rows = sqlx::query_as::<_, (String,)>(
        "SELECT name FROM sqlite_master WHERE type='table' AND name = 'sheet_rows'",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| PortalError::store("Failed to verify database schema", Some(Box::new(e))))?;

    if rows.is_empty() {
        return Err(PortalError::store(
            "Database schema incomplete: sheet_rows table missing",
            None,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_pool_and_migrations() {
        let pool = create_pool("sqlite::memory:")
            .await
            .expect("Failed to create pool");

        // Idempotent
        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        verify_database(&pool).await.expect("schema present");
    }

    #[tokio::test]
    async fn test_file_database_uses_wal() {
        let dir = tempfile::tempdir().expect("temp dir");
        let url = format!("sqlite:{}", dir.path().join("portal.db").display());
        let pool = create_pool(&url).await.expect("Failed to create pool");

        let result: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .expect("Failed to query journal mode");

        assert_eq!(result.0, "wal");
    }

    #[tokio::test]
    async fn test_rows_persist_across_pools() {
        let dir = tempfile::tempdir().expect("temp dir");
        let url = format!("sqlite:{}", dir.path().join("portal.db").display());
        let range = SheetRange::parse(sheet::REGISTRATIONS).expect("range");

        {
            let store = SheetRepository::new(create_pool(&url).await.expect("pool"));
            store
                .append_row(&range, vec!["REG-1".to_string()])
                .await
                .expect("append");
        }

        let store = SheetRepository::new(create_pool(&url).await.expect("pool"));
        let rows = store.read_range(&range).await.expect("read");
        assert_eq!(rows, vec![vec!["REG-1".to_string()]]);
    }

    #[tokio::test]
    async fn test_bad_url_is_store_error() {
        let result = create_pool("postgres://nope").await;
        assert!(matches!(result, Err(PortalError::StoreError { .. })));
    }
}
