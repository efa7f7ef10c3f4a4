//! SQLite-backed sheet storage.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::models::{encode_cells, SheetRowRecord};
use super::sheet::{SheetRange, SheetStore};
use crate::error::{PortalError, PortalResult};

/// Sheet store over the `sheet_rows` table.
#[derive(Debug, Clone)]
pub struct SheetRepository {
    pool: SqlitePool,
}

impl SheetRepository {
    /// Creates a repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn rows(&self, sheet: &str) -> PortalResult<Vec<SheetRowRecord>> {
        sqlx::query_as::<_, SheetRowRecord>(
            "SELECT id, sheet, cells, created_at FROM sheet_rows WHERE sheet = ? ORDER BY id",
        )
        .bind(sheet)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortalError::store(format!("Failed to read sheet {sheet}"), Some(Box::new(e))))
    }
}

#[async_trait]
impl SheetStore for SheetRepository {
    #[instrument(skip(self, values), fields(sheet = range.sheet()))]
    async fn append_row(&self, range: &SheetRange, values: Vec<String>) -> PortalResult<()> {
        let mut row = Vec::with_capacity(range.first_column() + values.len());
        range.overlay(&mut row, &values);

        let result = sqlx::query("INSERT INTO sheet_rows (sheet, cells, created_at) VALUES (?, ?, ?)")
            .bind(range.sheet())
            .bind(encode_cells(&row)?)
            .bind(chrono::Utc::now().timestamp())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                PortalError::store(
                    format!("Failed to append to sheet {}", range.sheet()),
                    Some(Box::new(e)),
                )
            })?;

        debug!(id = result.last_insert_rowid(), "Row appended");
        Ok(())
    }

    async fn read_range(&self, range: &SheetRange) -> PortalResult<Vec<Vec<String>>> {
        self.rows(range.sheet())
            .await?
            .iter()
            .map(|record| record.values().map(|row| range.project(&row)))
            .collect()
    }

    #[instrument(skip(self, values), fields(sheet = range.sheet()))]
    async fn update_row(
        &self,
        range: &SheetRange,
        index: usize,
        values: Vec<String>,
    ) -> PortalResult<()> {
        let record = self
            .rows(range.sheet())
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| {
                PortalError::store(
                    format!("Row {index} does not exist in sheet {}", range.sheet()),
                    None,
                )
            })?;

        let mut row = record.values()?;
        range.overlay(&mut row, &values);

        sqlx::query("UPDATE sheet_rows SET cells = ? WHERE id = ?")
            .bind(encode_cells(&row)?)
            .bind(record.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                PortalError::store(
                    format!("Failed to update row {index} of sheet {}", range.sheet()),
                    Some(Box::new(e)),
                )
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    async fn repository() -> SheetRepository {
        SheetRepository::new(create_pool("sqlite::memory:").await.expect("pool"))
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn test_append_then_read_preserves_order() {
        let repo = repository().await;
        let range = SheetRange::parse("Registrations!A:C").unwrap();

        repo.append_row(&range, row(&["1", "Asha"])).await.unwrap();
        repo.append_row(&range, row(&["2", "Ravi", "x"])).await.unwrap();

        let rows = repo.read_range(&range).await.unwrap();
        assert_eq!(rows, vec![row(&["1", "Asha"]), row(&["2", "Ravi", "x"])]);
    }

    #[tokio::test]
    async fn test_sheets_are_isolated() {
        let repo = repository().await;
        let a = SheetRange::parse("A!A:B").unwrap();
        let b = SheetRange::parse("B!A:B").unwrap();

        repo.append_row(&a, row(&["only in a"])).await.unwrap();

        assert_eq!(repo.read_range(&a).await.unwrap().len(), 1);
        assert!(repo.read_range(&b).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_row_overwrites_span() {
        let repo = repository().await;
        let full = SheetRange::parse("Admins!A:E").unwrap();
        repo.append_row(&full, row(&["a@x.org", "hash", "admin", "Asha", ""]))
            .await
            .unwrap();

        let last_login = SheetRange::parse("Admins!E:E").unwrap();
        repo.update_row(&last_login, 0, row(&["2026-03-01T10:00:00Z"]))
            .await
            .unwrap();

        let rows = repo.read_range(&full).await.unwrap();
        assert_eq!(rows[0][4], "2026-03-01T10:00:00Z");
        assert_eq!(rows[0][0], "a@x.org");
    }

    #[tokio::test]
    async fn test_update_missing_row_fails() {
        let repo = repository().await;
        let range = SheetRange::parse("Admins!A:E").unwrap();
        let result = repo.update_row(&range, 3, row(&["x"])).await;
        assert!(matches!(result, Err(PortalError::StoreError { .. })));
    }
}
