//! Axum server setup and routing.

use axum::{
    middleware,
    routing::{delete, get, post, MethodRouter},
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::{admin, auth, fallback, generate, health, intake};
use crate::api::{docs::ApiDoc, middleware as api_middleware};
use crate::app_state::AppState;
use crate::limiter::Sweeper;

/// Give a route the JSON 405 for unsupported methods.
fn only(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(fallback::method_not_allowed)
}

/// Build the application router with all middleware.
///
/// `rate_limit_rpm` caps requests per minute across all clients.
pub fn build_router(state: AppState, rate_limit_rpm: u32) -> Router {
    let throttle = api_middleware::rate_limit::create_rate_limiter(rate_limit_rpm);

    let api_routes = Router::new()
        .route("/health", only(get(health::health_check)))
        .route("/register", only(post(intake::register)))
        .route("/participate", only(post(intake::participate)))
        .route("/generate", only(post(generate::generate)))
        .route("/auth/login", only(post(auth::login)))
        .route("/auth/session", only(get(auth::session)))
        .route("/auth/logout", only(delete(auth::logout)))
        .route("/admin/registrations", only(get(admin::list_registrations)))
        .route("/admin/participants", only(get(admin::list_participants)))
        .route("/admin/ai-usage", only(get(admin::list_ai_usage)));

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(api_middleware::logging::log_requests))
        .layer(middleware::from_fn(move |req, next| {
            api_middleware::rate_limit::rate_limit(throttle.clone(), req, next)
        }));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .fallback(fallback::not_found)
        .layer(middleware_stack)
        .with_state(state)
}

/// Run the API server until Ctrl-C.
///
/// Starts the rate-limit sweeper first and stops it after the server drains.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn run_server(
    state: AppState,
    port: u16,
    rate_limit_rpm: u32,
    sweep_interval: Duration,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let sweeper = Sweeper::start(state.limiters.all(), sweep_interval);
    let app = build_router(state, rate_limit_rpm);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    sweeper.stop().await;
    info!("API server stopped");

    served?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
