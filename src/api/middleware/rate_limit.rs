//! API-wide request throttle.
//!
//! Per-client, per-action limits live in [`crate::limiter`]; this layer only
//! caps the total request rate across all clients.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::warn;

use super::error::ApiError;

/// Shared throttle type.
pub type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Create a throttle allowing `requests_per_minute` across all clients.
///
/// Zero is raised to one.
#[must_use]
pub fn create_rate_limiter(requests_per_minute: u32) -> SharedRateLimiter {
    let rpm = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);
    Arc::new(RateLimiter::direct(Quota::per_minute(rpm)))
}

/// Reject requests beyond the throttle with a JSON 429.
pub async fn rate_limit(limiter: SharedRateLimiter, request: Request, next: Next) -> Response {
    match limiter.check() {
        Ok(()) => next.run(request).await,
        Err(_) => {
            warn!(path = %request.uri().path(), "API throttle exceeded");
            ApiError::rate_limited("The server is busy. Please try again shortly.", None).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_is_enforced() {
        let limiter = create_rate_limiter(2);
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_err());
    }

    #[test]
    fn test_zero_rpm_still_admits_one() {
        let limiter = create_rate_limiter(0);
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_err());
    }
}
