//! Admin login, session lookup and logout.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::PrivateCookieJar;
use chrono::Utc;
use tracing::{info, instrument, warn};

use super::reject_if_limited;
use crate::api::extractors::{ClientKey, CurrentUser, JsonBody};
use crate::api::middleware::error::ApiError;
use crate::api::models::{ErrorResponse, LoginRequest, LogoutResponse, SessionResponse};
use crate::app_state::AppState;
use crate::auth::{self, create_session, destroy_session, SessionUser};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in; session cookie set", body = SessionResponse),
        (status = 400, description = "Missing email or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 429, description = "Too many failed attempts", body = ErrorResponse)
    ),
    tag = "Auth"
)]
/// Verifies admin credentials and starts a session.
///
/// Each failed attempt counts against the client's login quota; a success
/// clears it.
#[instrument(skip(state, jar, body), fields(client = %client.0))]
pub async fn login(
    State(state): State<AppState>,
    client: ClientKey,
    jar: PrivateCookieJar,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<(PrivateCookieJar, Json<SessionResponse>), ApiError> {
    let limiter = &state.limiters.login;
    reject_if_limited(
        limiter,
        &client.0,
        "Too many login attempts. Please try again in 15 minutes.",
    )?;

    let (email, password) = body.validate()?;

    let Some(account) = auth::authenticate(state.store.as_ref(), &email, &password).await? else {
        limiter.record_action(&client.0);
        warn!("Failed admin login");
        return Err(ApiError::InvalidCredentials);
    };

    limiter.clear(&client.0);

    let now = Utc::now();
    let user = SessionUser::for_account(&account, now);
    let jar = create_session(jar, &user, &state.session)?;

    if let Err(e) = auth::stamp_last_login(state.store.as_ref(), &account, now).await {
        warn!(error = %e, "Failed to record last login");
    }

    info!(email = %user.email, role = %user.role, "Admin signed in");
    Ok((jar, Json(SessionResponse { user })))
}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    tag = "Auth"
)]
/// Returns the signed-in admin.
pub async fn session(CurrentUser(user): CurrentUser) -> Json<SessionResponse> {
    Json(SessionResponse { user })
}

#[utoipa::path(
    delete,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = LogoutResponse)
    ),
    tag = "Auth"
)]
/// Ends the session. Succeeds whether or not one existed.
#[instrument(skip(jar))]
pub async fn logout(jar: PrivateCookieJar) -> (PrivateCookieJar, Json<LogoutResponse>) {
    (destroy_session(jar), Json(LogoutResponse { success: true }))
}
