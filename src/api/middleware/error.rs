//! Unified API error handling.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;
use tracing::error;

use crate::api::models::ErrorResponse;
use crate::error::PortalError;

/// API-specific error type.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed request fields.
    Validation(String),
    /// No valid session.
    Unauthenticated,
    /// Wrong email or password.
    InvalidCredentials,
    /// Signed in without the required role.
    Forbidden,
    /// Unknown route.
    NotFound,
    /// Known route, wrong method.
    MethodNotAllowed,
    /// Too many attempts; retry after the given delay when known.
    RateLimited {
        /// Message shown to the client
        message: String,
        /// `Retry-After` value
        retry_after: Option<Duration>,
    },
    /// The sheet store failed on a critical write or read.
    Store(String),
    /// Anything else.
    Internal(String),
}

impl ApiError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::Store(_) => "STORE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Rate-limit rejection for an action.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, retry_after) = match self {
            Self::Validation(msg) => (msg, None),
            Self::Unauthenticated => ("Authentication required".to_string(), None),
            Self::InvalidCredentials => ("Invalid email or password".to_string(), None),
            Self::Forbidden => ("You do not have access to this resource".to_string(), None),
            Self::NotFound => ("Not found".to_string(), None),
            Self::MethodNotAllowed => ("Method not allowed".to_string(), None),
            Self::RateLimited {
                message,
                retry_after,
            } => (message, retry_after),
            Self::Store(msg) => {
                error!(error = %msg, "Store error in API handler");
                ("We could not save your request. Please try again later.".to_string(), None)
            }
            Self::Internal(msg) => {
                error!(error = %msg, "Internal error in API handler");
                ("Internal server error".to_string(), None)
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code: code.to_string(),
        });

        let mut response = (status, body).into_response();
        if let Some(delay) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&delay.as_secs().max(1).to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<PortalError> for ApiError {
    fn from(err: PortalError) -> Self {
        match err {
            PortalError::ValidationError { message } => Self::Validation(message),
            PortalError::StoreError { .. } => Self::Store(err.to_string()),
            _ => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code_pairs() {
        let cases = [
            (ApiError::Validation("x".into()), 400, "VALIDATION_ERROR"),
            (ApiError::Unauthenticated, 401, "UNAUTHENTICATED"),
            (ApiError::InvalidCredentials, 401, "INVALID_CREDENTIALS"),
            (ApiError::Forbidden, 403, "FORBIDDEN"),
            (ApiError::NotFound, 404, "NOT_FOUND"),
            (ApiError::MethodNotAllowed, 405, "METHOD_NOT_ALLOWED"),
            (ApiError::rate_limited("slow down", None), 429, "RATE_LIMITED"),
            (ApiError::Store("db".into()), 500, "STORE_ERROR"),
            (ApiError::Internal("x".into()), 500, "INTERNAL_ERROR"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status().as_u16(), status);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_retry_after_header() {
        let response = ApiError::rate_limited("slow down", Some(Duration::from_secs(3600))).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).and_then(|v| v.to_str().ok()),
            Some("3600")
        );
    }

    #[test]
    fn test_portal_error_mapping() {
        assert!(matches!(
            ApiError::from(PortalError::validation("name is required")),
            ApiError::Validation(msg) if msg == "name is required"
        ));
        assert!(matches!(ApiError::from(PortalError::store("disk full", None)), ApiError::Store(_)));
        assert!(matches!(ApiError::from(PortalError::ai("down", None)), ApiError::Internal(_)));
    }
}
