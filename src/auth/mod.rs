//! Admin accounts and password verification.
//!
//! Accounts live in the `Admins` sheet, one row per admin:
//! email, bcrypt hash, role, display name, last login.

mod session;

pub use session::{create_session, current_user, destroy_session, SessionSettings, SessionUser, SESSION_COOKIE};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::db::{sheet, SheetRange, SheetStore};
use crate::error::{PortalError, PortalResult};

/// Admin permission level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including registrations and AI usage.
    Admin,
    /// Participant lists only.
    Coordinator,
}

impl Role {
    /// Parse a sheet value. Anything other than `admin` is a coordinator.
    #[must_use]
    pub fn from_sheet(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::Coordinator
        }
    }

    /// Lower-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Coordinator => "coordinator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the `Admins` sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    /// Zero-based row position, used for the last-login stamp
    pub row: usize,
    /// Login email, compared case-insensitively
    pub email: String,
    /// bcrypt hash
    pub password_hash: String,
    /// Permission level
    pub role: Role,
    /// Display name
    pub name: String,
    /// Last successful login, as stored
    pub last_login: Option<String>,
}

impl AdminAccount {
    /// Build an account from a sheet row. Rows without an email or hash are skipped.
    #[must_use]
    pub fn from_row(row: usize, cells: &[String]) -> Option<Self> {
        let cell = |i: usize| cells.get(i).map(|c| c.trim()).unwrap_or_default();

        let email = cell(0);
        let password_hash = cell(1);
        if email.is_empty() || password_hash.is_empty() {
            return None;
        }

        let last_login = Some(cell(4)).filter(|v| !v.is_empty()).map(str::to_string);
        let name = match cell(3) {
            "" => email,
            name => name,
        };

        Some(Self {
            row,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: Role::from_sheet(cell(2)),
            name: name.to_string(),
            last_login,
        })
    }

    /// Row values in sheet order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.email.clone(),
            self.password_hash.clone(),
            self.role.as_str().to_string(),
            self.name.clone(),
            self.last_login.clone().unwrap_or_default(),
        ]
    }
}

/// Look up an admin by email.
///
/// # Errors
///
/// Returns a store error when the `Admins` sheet cannot be read.
pub async fn find_admin(store: &dyn SheetStore, email: &str) -> PortalResult<Option<AdminAccount>> {
    let range = SheetRange::parse(sheet::ADMINS)?;
    let wanted = email.trim();

    Ok(store
        .read_range(&range)
        .await?
        .iter()
        .enumerate()
        .filter_map(|(row, cells)| AdminAccount::from_row(row, cells))
        .find(|account| account.email.eq_ignore_ascii_case(wanted)))
}

/// Check `password` against a bcrypt `hash` off the async runtime.
///
/// A malformed hash counts as a mismatch.
///
/// # Errors
///
/// Returns an auth error if the blocking task panics.
pub async fn verify_password(password: &str, hash: &str) -> PortalResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| PortalError::auth(format!("Password verification task failed: {e}")))?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            warn!(error = %e, "Stored password hash is malformed");
            Ok(false)
        }
    }
}

/// Verify credentials against the `Admins` sheet.
///
/// Returns `None` for an unknown email or a wrong password.
///
/// # Errors
///
/// Returns an error when the store cannot be read.
pub async fn authenticate(
    store: &dyn SheetStore,
    email: &str,
    password: &str,
) -> PortalResult<Option<AdminAccount>> {
    let Some(account) = find_admin(store, email).await? else {
        debug!("Login for unknown email");
        return Ok(None);
    };

    if verify_password(password, &account.password_hash).await? {
        Ok(Some(account))
    } else {
        Ok(None)
    }
}

/// Write the last-login column for `account`.
///
/// # Errors
///
/// Returns a store error if the row cannot be updated.
pub async fn stamp_last_login(
    store: &dyn SheetStore,
    account: &AdminAccount,
    at: DateTime<Utc>,
) -> PortalResult<()> {
    let range = SheetRange::parse("Admins!E:E")?;
    store
        .update_row(&range, account.row, vec![at.to_rfc3339()])
        .await
}
