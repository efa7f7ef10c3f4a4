//! Health check endpoint.

use axum::{extract::State, Json};
use std::time::SystemTime;
use tracing::instrument;

use crate::api::models::HealthResponse;
use crate::app_state::AppState;

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "Health"
)]
/// Returns service health information.
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = SystemTime::now()
        .duration_since(state.start_time)
        .unwrap_or_default()
        .as_secs();

    let rate_limited_clients = state
        .limiters
        .all()
        .iter()
        .map(|limiter| (limiter.name().to_string(), limiter.tracked()))
        .collect();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        ai_enabled: state.model.is_some(),
        email_enabled: state.mailer.delivers(),
        rate_limited_clients,
    })
}
