//! JSON answers for unknown routes and unsupported methods.

use crate::api::middleware::error::ApiError;

/// 404 for any unmatched path.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// 405 for a known path called with the wrong method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
