//! Sheet range notation and the store trait.

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::error::{PortalError, PortalResult};

/// Public event registrations.
pub const REGISTRATIONS: &str = "Registrations!A:J";
/// Multi-role participation applications.
pub const PARTICIPATION: &str = "Participation!A:L";
/// One row per content generation.
pub const AI_USAGE: &str = "AIUsage!A:F";
/// Admin accounts: email, bcrypt hash, role, name, last login.
pub const ADMINS: &str = "Admins!A:E";

/// A parsed `Sheet!A:H` range.
///
/// The sheet name selects the rows; the column span selects which cells of
/// each row are returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    sheet: String,
    first: usize,
    last: usize,
}

impl SheetRange {
    /// Parse range notation.
    ///
    /// # Errors
    ///
    /// Returns a store error when the notation is malformed.
    pub fn parse(notation: &str) -> PortalResult<Self> {
        let invalid = || PortalError::store(format!("Invalid sheet range: {notation}"), None);

        let (sheet, span) = notation.split_once('!').ok_or_else(invalid)?;
        let sheet = sheet.trim().trim_matches('\'');
        if sheet.is_empty() {
            return Err(invalid());
        }

        let (first, last) = span.split_once(':').unwrap_or((span, span));
        let first = column_index(first).ok_or_else(invalid)?;
        let last = column_index(last).ok_or_else(invalid)?;
        if last < first {
            return Err(invalid());
        }

        Ok(Self {
            sheet: sheet.to_string(),
            first,
            last,
        })
    }

    /// Sheet name.
    #[must_use]
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// Zero-based index of the first column.
    #[must_use]
    pub const fn first_column(&self) -> usize {
        self.first
    }

    /// Number of columns in the span.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.last - self.first + 1
    }

    /// Cells of `row` that fall inside the span.
    #[must_use]
    pub fn project(&self, row: &[String]) -> Vec<String> {
        row.iter().skip(self.first).take(self.width()).cloned().collect()
    }

    /// Write `values` into `row` starting at the first column.
    pub fn overlay(&self, row: &mut Vec<String>, values: &[String]) {
        for (offset, value) in values.iter().take(self.width()).enumerate() {
            let at = self.first + offset;
            if row.len() <= at {
                row.resize(at + 1, String::new());
            }
            row[at].clone_from(value);
        }
    }
}

impl FromStr for SheetRange {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}!{}:{}",
            self.sheet,
            column_name(self.first),
            column_name(self.last)
        )
    }
}

/// `A` -> 0, `Z` -> 25, `AA` -> 26. Row numbers after the letters are ignored.
fn column_index(reference: &str) -> Option<usize> {
    let letters: String = reference
        .trim()
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .collect();
    if letters.is_empty() {
        return None;
    }
    let mut index = 0usize;
    for c in letters.chars() {
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index - 1)
}

fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(char::from(b'A' + (index % 26) as u8));
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.iter().rev().collect()
}

/// Spreadsheet-style row storage.
///
/// Rows are append-only apart from [`SheetStore::update_row`], which exists
/// for the admin last-login stamp.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Append one row to the sheet named by `range`.
    async fn append_row(&self, range: &SheetRange, values: Vec<String>) -> PortalResult<()>;

    /// All rows of the sheet, projected onto the range's columns, in append order.
    async fn read_range(&self, range: &SheetRange) -> PortalResult<Vec<Vec<String>>>;

    /// Overwrite cells of the zero-based row `index`.
    async fn update_row(
        &self,
        range: &SheetRange,
        index: usize,
        values: Vec<String>,
    ) -> PortalResult<()>;
}
