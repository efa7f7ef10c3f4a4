//! Session-gated data retrieval for organizers.

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{info, instrument};

use crate::api::extractors::{AdminUser, CurrentUser};
use crate::api::middleware::error::ApiError;
use crate::api::models::{
    AiUsageList, AiUsageRecord, ErrorResponse, ListResponse, ParticipantList, ParticipantQuery,
    ParticipantRecord, ParticipantRole, RegistrationList, RegistrationQuery, RegistrationRecord,
};
use crate::app_state::AppState;
use crate::db::{sheet, SheetRange};

async fn read_sheet(state: &AppState, notation: &str) -> Result<Vec<Vec<String>>, ApiError> {
    let range = SheetRange::parse(notation)?;
    Ok(state.store.read_range(&range).await?)
}

#[utoipa::path(
    get,
    path = "/api/admin/registrations",
    params(RegistrationQuery),
    responses(
        (status = 200, description = "Registrations in submission order", body = RegistrationList),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin"
)]
/// Lists registrations, optionally only those for one email.
#[instrument(skip(state, user, query), fields(admin = %user.email))]
pub async fn list_registrations(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
    Query(query): Query<RegistrationQuery>,
) -> Result<Json<ListResponse<RegistrationRecord>>, ApiError> {
    let email = query.email.map(|e| e.trim().to_lowercase()).filter(|e| !e.is_empty());

    let items: Vec<RegistrationRecord> = read_sheet(&state, sheet::REGISTRATIONS)
        .await?
        .iter()
        .filter_map(|row| RegistrationRecord::from_row(row))
        .filter(|record| {
            email
                .as_deref()
                .map_or(true, |wanted| record.email.eq_ignore_ascii_case(wanted))
        })
        .collect();

    info!(count = items.len(), "Registrations listed");
    Ok(Json(items.into()))
}

#[utoipa::path(
    get,
    path = "/api/admin/participants",
    params(ParticipantQuery),
    responses(
        (status = 200, description = "Applications in submission order", body = ParticipantList),
        (status = 400, description = "Unknown role filter", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    tag = "Admin"
)]
/// Lists participation applications, optionally for one role.
#[instrument(skip(state, user, query), fields(admin = %user.email))]
pub async fn list_participants(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ParticipantQuery>,
) -> Result<Json<ListResponse<ParticipantRecord>>, ApiError> {
    let role = match query.role.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        Some(tag) => Some(ParticipantRole::parse(tag).ok_or_else(|| {
            ApiError::Validation(format!("Unknown role filter: {tag}"))
        })?),
        None => None,
    };

    let items: Vec<ParticipantRecord> = read_sheet(&state, sheet::PARTICIPATION)
        .await?
        .iter()
        .filter_map(|row| ParticipantRecord::from_row(row))
        .filter(|record| role.map_or(true, |wanted| record.role == wanted))
        .collect();

    info!(count = items.len(), "Participants listed");
    Ok(Json(items.into()))
}

#[utoipa::path(
    get,
    path = "/api/admin/ai-usage",
    responses(
        (status = 200, description = "Generation log", body = AiUsageList),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    tag = "Admin"
)]
/// Lists every content generation.
#[instrument(skip(state, user), fields(admin = %user.email))]
pub async fn list_ai_usage(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
) -> Result<Json<ListResponse<AiUsageRecord>>, ApiError> {
    let items: Vec<AiUsageRecord> = read_sheet(&state, sheet::AI_USAGE)
        .await?
        .iter()
        .filter_map(|row| AiUsageRecord::from_row(row))
        .collect();

    Ok(Json(items.into()))
}
