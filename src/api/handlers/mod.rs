//! HTTP handlers for API endpoints.

pub mod admin;
pub mod auth;
pub mod fallback;
pub mod generate;
pub mod health;
pub mod intake;

use tracing::info;

use crate::api::middleware::error::ApiError;
use crate::limiter::RateLimiter;

/// 429 when `key` has used up its quota on `limiter`. Never records an action.
pub(crate) fn reject_if_limited(
    limiter: &RateLimiter,
    key: &str,
    message: &str,
) -> Result<(), ApiError> {
    if limiter.is_limited(key) {
        info!(limiter = limiter.name(), client = key, "Rate limit reached");
        return Err(ApiError::rate_limited(message, Some(limiter.policy().window)));
    }
    Ok(())
}
