//! Row model for the `sheet_rows` table.

use serde::{Deserialize, Serialize};

use crate::error::{PortalError, PortalResult};

/// One stored sheet row.
///
/// Cells are kept as a JSON array of strings so sheets with different
/// column counts share a table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SheetRowRecord {
    /// Database-assigned identifier, also the append order
    pub id: i64,
    /// Sheet name (`Registrations`, `Admins`, ...)
    pub sheet: String,
    /// JSON-encoded cell values
    pub cells: String,
    /// Unix timestamp when the row was appended
    pub created_at: i64,
}

impl SheetRowRecord {
    /// Decode the cell values.
    ///
    /// # Errors
    ///
    /// Returns a store error when the stored JSON is not a string array.
    pub fn values(&self) -> PortalResult<Vec<String>> {
        decode_cells(&self.cells)
    }
}

/// Encode cell values for storage.
///
/// # Errors
///
/// Returns a store error if serialization fails.
pub fn encode_cells(values: &[String]) -> PortalResult<String> {
    serde_json::to_string(values)
        .map_err(|e| PortalError::store("Failed to encode row cells", Some(Box::new(e))))
}

/// Decode stored cell values.
///
/// # Errors
///
/// Returns a store error when the JSON is not a string array.
pub fn decode_cells(cells: &str) -> PortalResult<Vec<String>> {
    serde_json::from_str(cells)
        .map_err(|e| PortalError::store("Stored row cells are corrupt", Some(Box::new(e))))
}
