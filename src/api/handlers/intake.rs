//! Public registration and participation intake.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::reject_if_limited;
use crate::api::extractors::{ClientKey, JsonBody};
use crate::api::middleware::error::ApiError;
use crate::api::models::{
    ErrorResponse, ParticipationRequest, ParticipationResponse, RegistrationRequest,
    RegistrationResponse,
};
use crate::app_state::AppState;
use crate::db::{sheet, SheetRange};
use crate::mail::{send_quietly, templates};

/// Short human-friendly reference such as `REG-1A2B3C4D`.
fn reference(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{prefix}-{}", &id[..8])
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Registration stored", body = RegistrationResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 429, description = "Too many submissions from this client", body = ErrorResponse),
        (status = 500, description = "Registration could not be stored", body = ErrorResponse)
    ),
    tag = "Intake"
)]
/// Stores a public event registration and sends a confirmation.
#[instrument(skip(state, body), fields(client = %client.0))]
pub async fn register(
    State(state): State<AppState>,
    client: ClientKey,
    JsonBody(body): JsonBody<RegistrationRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), ApiError> {
    let limiter = &state.limiters.submission;
    reject_if_limited(
        limiter,
        &client.0,
        "Too many registration attempts. Please try again later.",
    )?;

    let registration = body.validate()?;
    let id = reference("REG");

    let range = SheetRange::parse(sheet::REGISTRATIONS)?;
    state
        .store
        .append_row(&range, registration.to_row(&id, Utc::now(), &client.0))
        .await?;

    let email = templates::registration_confirmation(
        &state.email_from,
        &registration.email,
        &registration.name,
        &id,
    );
    send_quietly(state.mailer.as_ref(), &email).await;

    limiter.record_action(&client.0);
    info!(registration_id = %id, "Registration stored");

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            success: true,
            registration_id: id,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/participate",
    request_body = ParticipationRequest,
    responses(
        (status = 201, description = "Application stored", body = ParticipationResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 429, description = "Too many submissions from this client", body = ErrorResponse),
        (status = 500, description = "Application could not be stored", body = ErrorResponse)
    ),
    tag = "Intake"
)]
/// Stores a startup, mentor, investor or volunteer application.
#[instrument(skip(state, body), fields(client = %client.0))]
pub async fn participate(
    State(state): State<AppState>,
    client: ClientKey,
    JsonBody(body): JsonBody<ParticipationRequest>,
) -> Result<(StatusCode, Json<ParticipationResponse>), ApiError> {
    let limiter = &state.limiters.participation;
    reject_if_limited(
        limiter,
        &client.0,
        "Too many applications from this device. Please try again later.",
    )?;

    let participation = body.validate()?;
    let id = reference("PRT");

    let range = SheetRange::parse(sheet::PARTICIPATION)?;
    state
        .store
        .append_row(&range, participation.to_row(&id, Utc::now(), &client.0))
        .await?;

    let email = templates::participation_confirmation(
        &state.email_from,
        &participation.email,
        &participation.name,
        participation.role.as_str(),
        &id,
    );
    send_quietly(state.mailer.as_ref(), &email).await;

    limiter.record_action(&client.0);
    info!(application_id = %id, role = participation.role.as_str(), "Participation stored");

    Ok((
        StatusCode::CREATED,
        Json(ParticipationResponse {
            success: true,
            application_id: id,
            role: participation.role,
        }),
    ))
}
