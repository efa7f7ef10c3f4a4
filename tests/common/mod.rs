//! Shared helpers for driving the router in-process.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use ceo_portal::ai::ContentModel;
use ceo_portal::api::build_router;
use ceo_portal::app_state::AppState;
use ceo_portal::db::MemorySheets;
use ceo_portal::error::{PortalError, PortalResult};
use ceo_portal::limiter::{Limiters, ManualClock};
use ceo_portal::mail::{Email, Mailer};

pub const ADMIN_EMAIL: &str = "lead@summit.org";
pub const ADMIN_PASSWORD: &str = "admin-pass-123";
pub const COORDINATOR_EMAIL: &str = "coord@summit.org";
pub const COORDINATOR_PASSWORD: &str = "coord-pass-456";

/// Mailer that keeps every message, or fails every send.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<Email>>,
    pub fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &Email) -> PortalResult<()> {
        if self.fail {
            return Err(PortalError::email("provider unavailable", None));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Model that returns a fixed completion or a fixed failure.
pub struct ScriptedModel {
    pub reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ContentModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> PortalResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| PortalError::ai("upstream returned 503", None))
    }

    fn name(&self) -> &str {
        "scripted-model"
    }
}

/// Sheet store that fails every call.
pub struct BrokenSheets;

#[async_trait]
impl ceo_portal::db::SheetStore for BrokenSheets {
    async fn append_row(&self, _: &ceo_portal::db::SheetRange, _: Vec<String>) -> PortalResult<()> {
        Err(PortalError::store("disk full", None))
    }

    async fn read_range(&self, _: &ceo_portal::db::SheetRange) -> PortalResult<Vec<Vec<String>>> {
        Err(PortalError::store("disk full", None))
    }

    async fn update_row(
        &self,
        _: &ceo_portal::db::SheetRange,
        _: usize,
        _: Vec<String>,
    ) -> PortalResult<()> {
        Err(PortalError::store("disk full", None))
    }
}

fn admin_rows() -> Vec<Vec<String>> {
    let admin = bcrypt::hash(ADMIN_PASSWORD, 4).unwrap();
    let coordinator = bcrypt::hash(COORDINATOR_PASSWORD, 4).unwrap();
    vec![
        vec![ADMIN_EMAIL.into(), admin, "admin".into(), "Asha Lead".into(), String::new()],
        vec![
            COORDINATOR_EMAIL.into(),
            coordinator,
            "coordinator".into(),
            "Ravi Coord".into(),
            String::new(),
        ],
    ]
}

/// A router over in-memory collaborators with a controllable limiter clock.
pub struct Harness {
    pub app: Router,
    pub store: Arc<MemorySheets>,
    pub mailer: Arc<RecordingMailer>,
    pub clock: Arc<ManualClock>,
    pub limiters: Limiters,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(None, RecordingMailer::default())
    }

    pub fn with_model(model: Arc<dyn ContentModel>) -> Self {
        Self::build(Some(model), RecordingMailer::default())
    }

    pub fn with_failing_mailer() -> Self {
        Self::build(
            None,
            RecordingMailer {
                fail: true,
                ..RecordingMailer::default()
            },
        )
    }

    fn build(model: Option<Arc<dyn ContentModel>>, mailer: RecordingMailer) -> Self {
        let store = Arc::new(MemorySheets::new().with_rows("Admins", admin_rows()));
        let mailer = Arc::new(mailer);
        let clock = Arc::new(ManualClock::new());
        let limiters = Limiters::with_clock(clock.clone());

        let state = AppState::new(store.clone())
            .with_mailer(mailer.clone())
            .with_model(model)
            .with_limiters(limiters.clone());

        Self {
            app: build_router(state, 100_000),
            store,
            mailer,
            clock,
            limiters,
        }
    }

    /// Send a request and return status, headers and the JSON body (Null when empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, HeaderMap, Value) {
        send(&self.app, method, uri, body, headers).await
    }

    pub async fn post(&self, uri: &str, body: Value, ip: &str) -> (StatusCode, Value) {
        let (status, _, json) = self
            .send(Method::POST, uri, Some(body), &[("x-forwarded-for", ip)])
            .await;
        (status, json)
    }

    /// Log in and return the `Cookie` header value for later requests.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, headers, body) = self
            .send(
                Method::POST,
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                &[("x-forwarded-for", "198.51.100.1")],
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        session_cookie(&headers)
    }
}

/// `name=value` of the session cookie from a `Set-Cookie` header.
pub fn session_cookie(headers: &HeaderMap) -> String {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("ceo_portal_session="))
        .and_then(|v| v.split(';').next())
        .expect("session cookie set")
        .to_string()
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, headers, json)
}
