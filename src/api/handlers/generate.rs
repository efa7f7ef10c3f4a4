//! AI-assisted content generation.

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::{info, instrument, warn};

use super::reject_if_limited;
use crate::ai::{generate_with_fallback, ContentSource, Generated};
use crate::api::extractors::{ClientKey, JsonBody};
use crate::api::middleware::error::ApiError;
use crate::api::models::{timestamp, AiUsageRecord, ErrorResponse, GenerateRequest, GenerateResponse};
use crate::app_state::AppState;
use crate::content::{ContentKind, GenerationRequest, Inputs};
use crate::db::{sheet, SheetRange};

#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated document", body = GenerateResponse),
        (status = 400, description = "Missing type", body = ErrorResponse),
        (status = 429, description = "Too many generations from this client", body = ErrorResponse)
    ),
    tag = "Generation"
)]
/// Generates a business document, from the AI model when available and
/// from templates otherwise.
#[instrument(skip(state, body), fields(client = %client.0))]
pub async fn generate(
    State(state): State<AppState>,
    client: ClientKey,
    JsonBody(body): JsonBody<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let limiter = &state.limiters.generation;
    reject_if_limited(
        limiter,
        &client.0,
        "Generation limit reached. Please try again later.",
    )?;

    let tag = body
        .kind
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("type is required".to_string()))?
        .to_string();

    let kind = ContentKind::parse(&tag);
    if !kind.is_known() {
        info!(kind = %tag, "Unrecognized content type, using generic document");
    }
    let request = GenerationRequest::new(kind, Inputs::new(body.text_inputs()));

    let generated = generate_with_fallback(state.model.as_deref(), &request).await;
    log_usage(&state, &client.0, &tag, &generated).await;
    limiter.record_action(&client.0);

    Ok(Json(GenerateResponse {
        kind: tag,
        content: generated.content,
        source: generated.source,
    }))
}

/// Append an `AIUsage` row. Failures are logged only.
async fn log_usage(state: &AppState, client: &str, tag: &str, generated: &Generated) {
    let model = match (generated.source, &state.model) {
        (ContentSource::Ai, Some(model)) => model.name().to_string(),
        _ => String::new(),
    };
    let record = AiUsageRecord {
        timestamp: timestamp(Utc::now()),
        client_key: client.to_string(),
        content_type: tag.to_string(),
        source: generated.source.as_str().to_string(),
        model,
        characters: generated.content.chars().count() as u64,
    };

    let result = match SheetRange::parse(sheet::AI_USAGE) {
        Ok(range) => state.store.append_row(&range, record.to_row()).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        warn!(error = %e, "Failed to record AI usage");
    }
}
