//! In-memory sheet store.

use async_trait::async_trait;
use dashmap::DashMap;

use super::sheet::{SheetRange, SheetStore};
use crate::error::{PortalError, PortalResult};

/// Sheet store held in process memory.
///
/// Used by tests and by `serve --ephemeral`. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemorySheets {
    sheets: DashMap<String, Vec<Vec<String>>>,
}

impl MemorySheets {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a sheet with rows.
    #[must_use]
    pub fn with_rows(self, sheet: &str, rows: Vec<Vec<String>>) -> Self {
        self.sheets.entry(sheet.to_string()).or_default().extend(rows);
        self
    }

    /// Full rows of a sheet, unprojected.
    #[must_use]
    pub fn rows(&self, sheet: &str) -> Vec<Vec<String>> {
        self.sheets.get(sheet).map(|rows| rows.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SheetStore for MemorySheets {
    async fn append_row(&self, range: &SheetRange, values: Vec<String>) -> PortalResult<()> {
        let mut row = Vec::new();
        range.overlay(&mut row, &values);
        self.sheets.entry(range.sheet().to_string()).or_default().push(row);
        Ok(())
    }

    async fn read_range(&self, range: &SheetRange) -> PortalResult<Vec<Vec<String>>> {
        Ok(self
            .sheets
            .get(range.sheet())
            .map(|rows| rows.iter().map(|row| range.project(row)).collect())
            .unwrap_or_default())
    }

    async fn update_row(
        &self,
        range: &SheetRange,
        index: usize,
        values: Vec<String>,
    ) -> PortalResult<()> {
        let mut rows = self.sheets.entry(range.sheet().to_string()).or_default();
        let row = rows.get_mut(index).ok_or_else(|| {
            PortalError::store(
                format!("Row {index} does not exist in sheet {}", range.sheet()),
                None,
            )
        })?;
        range.overlay(row, &values);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_projection_limits_columns() {
        let store = MemorySheets::new().with_rows(
            "Admins",
            vec![vec!["a@x.org".into(), "hash".into(), "admin".into(), "Asha".into(), String::new(), "extra".into()]],
        );
        let range = SheetRange::parse("Admins!A:E").unwrap();
        let rows = store.read_range(&range).await.unwrap();
        assert_eq!(rows[0].len(), 5);
    }

    #[tokio::test]
    async fn test_update_unknown_row_fails() {
        let store = MemorySheets::new();
        let range = SheetRange::parse("Admins!E:E").unwrap();
        assert!(store.update_row(&range, 0, vec!["x".into()]).await.is_err());
    }

    #[tokio::test]
    async fn test_append_is_visible_in_rows() {
        let store = MemorySheets::new();
        let range = SheetRange::parse("AIUsage!A:F").unwrap();
        store.append_row(&range, vec!["1".into()]).await.unwrap();
        assert_eq!(store.rows("AIUsage"), vec![vec!["1".to_string()]]);
    }
}
