//! Custom extractors for API handlers.

use axum::extract::{ConnectInfo, FromRef, FromRequest, FromRequestParts, Request};
use axum::http::{request::Parts, HeaderMap};
use axum::Json;
use axum_extra::extract::cookie::{Key, PrivateCookieJar};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::net::SocketAddr;

use crate::api::middleware::error::ApiError;
use crate::app_state::AppState;
use crate::auth::{current_user, Role, SessionUser};

/// Rate-limit bucket for the caller.
///
/// First entry of `X-Forwarded-For`, then `X-Real-IP`, then the socket peer,
/// then `unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKey(pub String);

impl ClientKey {
    /// Resolve the key from headers and an optional peer address.
    #[must_use]
    pub fn resolve(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let forwarded = header("x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let key = forwarded
            .or_else(|| header("x-real-ip"))
            .map(str::to_string)
            .or_else(|| peer.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| "unknown".to_string());

        Self(key)
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for ClientKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(Self::resolve(&parts.headers, peer))
    }
}

/// A signed-in admin of any role. Rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
    Key: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .map_err(|e: Infallible| -> ApiError { match e {} })?;

        current_user(&jar, app.session.ttl, chrono::Utc::now())
            .map(Self)
            .ok_or(ApiError::Unauthenticated)
    }
}

/// A signed-in admin with the `Admin` role. 401 without a session, 403 for coordinators.
#[derive(Debug, Clone)]
pub struct AdminUser(pub SessionUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
    Key: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.role == Role::Admin {
            Ok(Self(user))
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

/// JSON body whose rejections use the API error format.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| ApiError::Validation(format!("Invalid request body: {}", rejection.body_text())))
    }
}
