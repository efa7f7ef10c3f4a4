//! OpenAPI documentation for the REST API.

use utoipa::OpenApi;

use crate::api::handlers;

/// OpenAPI documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::intake::register,
        handlers::intake::participate,
        handlers::generate::generate,
        handlers::auth::login,
        handlers::auth::session,
        handlers::auth::logout,
        handlers::admin::list_registrations,
        handlers::admin::list_participants,
        handlers::admin::list_ai_usage,
    ),
    components(schemas(
        crate::api::models::ErrorResponse,
        crate::api::models::HealthResponse,
        crate::api::models::RegistrationRequest,
        crate::api::models::RegistrationResponse,
        crate::api::models::RegistrationRecord,
        crate::api::models::RegistrationList,
        crate::api::models::ParticipantRole,
        crate::api::models::ParticipationRequest,
        crate::api::models::ParticipationResponse,
        crate::api::models::ParticipantRecord,
        crate::api::models::ParticipantList,
        crate::api::models::GenerateRequest,
        crate::api::models::GenerateResponse,
        crate::api::models::AiUsageRecord,
        crate::api::models::AiUsageList,
        crate::api::models::LoginRequest,
        crate::api::models::SessionResponse,
        crate::api::models::LogoutResponse,
        crate::ai::ContentSource,
        crate::auth::Role,
        crate::auth::SessionUser,
    )),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Intake", description = "Public registration and participation forms"),
        (name = "Generation", description = "Business document generation"),
        (name = "Auth", description = "Admin sessions"),
        (name = "Admin", description = "Session-gated data retrieval"),
    ),
    info(
        title = "CEO Summit Portal API",
        version = "1.0.0",
        description = "Registration, participation intake and content generation for the entrepreneurship summit",
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/health",
            "/api/register",
            "/api/participate",
            "/api/generate",
            "/api/auth/login",
            "/api/auth/session",
            "/api/auth/logout",
            "/api/admin/registrations",
            "/api/admin/participants",
            "/api/admin/ai-usage",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing from OpenAPI");
        }
    }
}
