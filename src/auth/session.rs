//! Cookie-backed admin sessions.

use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AdminAccount, Role};
use crate::error::{PortalError, PortalResult};

/// Name of the encrypted session cookie.
pub const SESSION_COOKIE: &str = "ceo_portal_session";

/// Payload stored in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Admin email
    pub email: String,
    /// Permission level
    pub role: Role,
    /// Display name
    pub name: String,
    /// When the session was created
    pub login_time: DateTime<Utc>,
}

impl SessionUser {
    /// Session for an authenticated account.
    #[must_use]
    pub fn for_account(account: &AdminAccount, login_time: DateTime<Utc>) -> Self {
        Self {
            email: account.email.clone(),
            role: account.role,
            name: account.name.clone(),
            login_time,
        }
    }

    /// Whether the session is older than `ttl` at `now`.
    #[must_use]
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.login_time > ttl
    }
}

/// Cookie attributes and lifetime.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Maximum session age
    pub ttl: Duration,
    /// Set the `Secure` attribute
    pub secure: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(8),
            secure: false,
        }
    }
}

/// Add the session cookie for `user` to `jar`.
///
/// # Errors
///
/// Returns an auth error if the payload cannot be serialized.
pub fn create_session(
    jar: PrivateCookieJar,
    user: &SessionUser,
    settings: &SessionSettings,
) -> PortalResult<PrivateCookieJar> {
    let value = serde_json::to_string(user)
        .map_err(|e| PortalError::auth(format!("Failed to encode session: {e}")))?;

    let cookie = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure);

    Ok(jar.add(cookie))
}

/// Remove the session cookie.
#[must_use]
pub fn destroy_session(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// The signed-in user, if the cookie decrypts, parses and is still fresh.
#[must_use]
pub fn current_user(jar: &PrivateCookieJar, ttl: Duration, now: DateTime<Utc>) -> Option<SessionUser> {
    let cookie = jar.get(SESSION_COOKIE)?;
    let user: SessionUser = match serde_json::from_str(cookie.value()) {
        Ok(user) => user,
        Err(e) => {
            debug!(error = %e, "Discarding unreadable session cookie");
            return None;
        }
    };

    if user.is_expired(ttl, now) {
        debug!(email = %user.email, "Session expired");
        return None;
    }
    Some(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    fn user(login_time: DateTime<Utc>) -> SessionUser {
        SessionUser {
            email: "lead@summit.org".to_string(),
            role: Role::Admin,
            name: "Asha".to_string(),
            login_time,
        }
    }

    #[test]
    fn test_session_round_trips_through_jar() {
        let now = Utc::now();
        let jar = PrivateCookieJar::new(Key::generate());
        let jar = create_session(jar, &user(now), &SessionSettings::default()).expect("session");

        let found = current_user(&jar, Duration::hours(8), now).expect("signed in");
        assert_eq!(found, user(now));
    }

    #[test]
    fn test_cookie_attributes() {
        let jar = PrivateCookieJar::new(Key::generate());
        let settings = SessionSettings {
            ttl: Duration::hours(8),
            secure: true,
        };
        let jar = create_session(jar, &user(Utc::now()), &settings).expect("session");
        let cookie = jar.get(SESSION_COOKIE).expect("cookie");

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_expired_session_is_absent() {
        let login = Utc::now();
        let jar = PrivateCookieJar::new(Key::generate());
        let jar = create_session(jar, &user(login), &SessionSettings::default()).expect("session");

        let later = login + Duration::hours(8) + Duration::seconds(1);
        assert!(current_user(&jar, Duration::hours(8), later).is_none());
    }

    #[test]
    fn test_destroy_session_clears_user() {
        let now = Utc::now();
        let jar = PrivateCookieJar::new(Key::generate());
        let jar = create_session(jar, &user(now), &SessionSettings::default()).expect("session");
        let jar = destroy_session(jar);
        assert!(current_user(&jar, Duration::hours(8), now).is_none());
    }
}
