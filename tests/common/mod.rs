//! In-process test harness: builds the router over a fresh in-memory store
//! and drives it with `tower::ServiceExt::oneshot`, no server spawn needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use practice_api::store::MemoryStore;
use practice_api::{app, AppState};

pub const ADMIN_EMAIL: &str = "admin@financeplatform.com";
pub const ADMIN_PASSWORD: &str = "SecureAdmin2024!";

/// A fresh app over an empty store. The store handle is returned too so
/// tests can insert fixtures directly.
pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone());
    (app(state), store)
}

/// Send one request and decode the JSON body (empty bodies become null).
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request dispatch");
    let status = response.status();

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collect")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, value)
}

pub async fn get(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    request(app, "GET", uri, Some(token), None).await
}

pub async fn post(app: &Router, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
    request(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn put(app: &Router, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
    request(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    request(app, "DELETE", uri, Some(token), None).await
}

/// Seed the default admin and exchange its credentials for a token.
pub async fn seed_and_login(app: &Router) -> String {
    let (status, _) = request(app, "POST", "/api/auth/seed-admin", None, None).await;
    assert_eq!(status, StatusCode::OK, "seed-admin failed");
    login(app, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

/// Log in and return the bearer token.
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["access_token"]
        .as_str()
        .expect("access_token")
        .to_string()
}

/// Register a new organization with its admin; returns (token, response).
pub async fn register_org(app: &Router, org_name: &str, email: &str) -> (String, Value) {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "organization_name": org_name,
            "domain": format!("{}.example.com", org_name.to_lowercase().replace(' ', "-")),
            "email": email,
            "password": "TestPassword1!",
            "first_name": "Test",
            "last_name": "Admin",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    let token = body["access_token"]
        .as_str()
        .expect("access_token")
        .to_string();
    (token, body)
}
