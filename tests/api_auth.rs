//! Integration tests for admin login, sessions and the admin listings.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::{json, Value};

use common::{
    session_cookie, Harness, ADMIN_EMAIL, ADMIN_PASSWORD, COORDINATOR_EMAIL, COORDINATOR_PASSWORD,
};

const ATTACKER: &str = "192.0.2.66";

async fn attempt(harness: &Harness, email: &str, password: &str) -> (StatusCode, Value) {
    harness
        .post(
            "/api/auth/login",
            json!({ "email": email, "password": password }),
            ATTACKER,
        )
        .await
}

async fn get(harness: &Harness, uri: &str, cookie: Option<&str>) -> (StatusCode, Value) {
    let headers: Vec<(&str, &str)> = cookie.map(|c| ("cookie", c)).into_iter().collect();
    let (status, _, body) = harness.send(Method::GET, uri, None, &headers).await;
    (status, body)
}

async fn seed(harness: &Harness) {
    for (name, email, ip) in [
        ("Asha Rao", "asha@college.edu", "203.0.113.1"),
        ("Vikram Das", "vikram@college.edu", "203.0.113.2"),
    ] {
        let (status, _) = harness
            .post(
                "/api/register",
                json!({
                    "name": name,
                    "email": email,
                    "phone": "5551234567",
                    "college": "City College"
                }),
                ip,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _) = harness
        .post(
            "/api/participate",
            json!({
                "role": "volunteer",
                "name": "Meera Iyer",
                "email": "meera@college.edu",
                "phone": "5559876543",
                "details": { "availability": "Both days", "skills": "Logistics" }
            }),
            "203.0.113.3",
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = harness
        .post(
            "/api/generate",
            json!({ "type": "pitch_outline", "inputs": { "concept": "campus bikes" } }),
            "203.0.113.4",
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let harness = Harness::new();
    let (status, headers, body) = harness
        .send(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "Lead@Summit.org", "password": ADMIN_PASSWORD })),
            &[("x-forwarded-for", ATTACKER)],
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["name"], "Asha Lead");
    assert!(body["user"]["loginTime"].is_string());

    let set_cookie = headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("ceo_portal_session="))
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    // The cookie is encrypted, not readable JSON.
    assert!(!set_cookie.contains(ADMIN_EMAIL));

    let stamped = &harness.store.rows("Admins")[0][4];
    assert!(!stamped.is_empty());
}

#[tokio::test]
async fn test_session_round_trip_and_logout() {
    let harness = Harness::new();
    let cookie = harness.login(COORDINATOR_EMAIL, COORDINATOR_PASSWORD).await;

    let (status, body) = get(&harness, "/api/auth/session", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "coordinator");

    let (status, headers, body) = harness
        .send(Method::DELETE, "/api/auth/logout", None, &[("cookie", &cookie)])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let removal = session_cookie(&headers);
    assert_eq!(removal, "ceo_portal_session=");

    let (status, body) = get(&harness, "/api/auth/session", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_forged_cookie_is_rejected() {
    let harness = Harness::new();
    let forged = format!(
        "ceo_portal_session={}",
        json!({ "email": ADMIN_EMAIL, "role": "admin", "name": "x", "loginTime": "2026-01-01T00:00:00Z" })
    );
    let (status, body) = get(&harness, "/api/auth/session", Some(&forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let harness = Harness::new();
    let (status, _, body) = harness.send(Method::DELETE, "/api/auth/logout", None, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_bad_credentials() {
    let harness = Harness::new();

    let (status, body) = attempt(&harness, ADMIN_EMAIL, "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");

    // Unknown accounts look the same as wrong passwords.
    let (status, unknown) = attempt(&harness, "nobody@summit.org", "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, body);

    let (status, body) = attempt(&harness, ADMIN_EMAIL, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_failed_logins_are_limited() {
    let harness = Harness::new();
    for _ in 0..5 {
        let (status, _) = attempt(&harness, ADMIN_EMAIL, "wrong").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // Even the right password is refused while limited.
    let (status, body) = attempt(&harness, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], "RATE_LIMITED");

    harness.clock.advance(std::time::Duration::from_secs(15 * 60 + 1));
    let (status, _) = attempt(&harness, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_successful_login_clears_failures() {
    let harness = Harness::new();
    for _ in 0..4 {
        attempt(&harness, ADMIN_EMAIL, "wrong").await;
    }
    let (status, _) = attempt(&harness, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!harness.limiters.login.is_limited(ATTACKER));

    for _ in 0..4 {
        let (status, _) = attempt(&harness, ADMIN_EMAIL, "wrong").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_admin_listings_require_session() {
    let harness = Harness::new();
    for uri in [
        "/api/admin/registrations",
        "/api/admin/participants",
        "/api/admin/ai-usage",
    ] {
        let (status, body) = get(&harness, uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["code"], "UNAUTHENTICATED");
    }
}

#[tokio::test]
async fn test_coordinator_sees_participants_only() {
    let harness = Harness::new();
    seed(&harness).await;
    let cookie = harness.login(COORDINATOR_EMAIL, COORDINATOR_PASSWORD).await;

    let (status, body) = get(&harness, "/api/admin/participants", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["role"], "volunteer");

    for uri in ["/api/admin/registrations", "/api/admin/ai-usage"] {
        let (status, body) = get(&harness, uri, Some(&cookie)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body["code"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn test_admin_listings_and_filters() {
    let harness = Harness::new();
    seed(&harness).await;
    let cookie = harness.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = get(&harness, "/api/admin/registrations", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["items"][0]["name"], "Asha Rao");

    let (_, body) = get(
        &harness,
        "/api/admin/registrations?email=VIKRAM%40college.edu",
        Some(&cookie),
    )
    .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["email"], "vikram@college.edu");

    let (_, body) = get(&harness, "/api/admin/participants?role=mentor", Some(&cookie)).await;
    assert_eq!(body["count"], 0);

    let (status, body) = get(&harness, "/api/admin/participants?role=sponsor", Some(&cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = get(&harness, "/api/admin/ai-usage", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["contentType"], "pitch_outline");
    assert_eq!(body["items"][0]["source"], "fallback");
}
