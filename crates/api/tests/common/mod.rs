//! Shared helpers for the API integration tests.
//!
//! Tests drive the full router (same middleware stack as `main.rs`) with
//! `tower::ServiceExt::oneshot`, backed by in-memory storage.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use scriptstore_core::jobs::InMemoryJobQueue;
use scriptstore_core::scripts::{InMemoryScriptRepository, ScriptStore};
use scriptstore_core::types::DbId;
use scriptstore_events::EventBus;
use tower::ServiceExt;

use scriptstore_api::auth::jwt::{generate_access_token, JwtConfig};
use scriptstore_api::config::ServerConfig;
use scriptstore_api::router::build_app_router;
use scriptstore_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        max_body_bytes: 2 * 1024 * 1024,
        database_url: None,
        log_json: false,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// A router plus handles on its in-memory job queue and event bus.
pub struct TestApp {
    pub router: Router,
    pub jobs: Arc<InMemoryJobQueue>,
    pub event_bus: Arc<EventBus>,
}

/// Build the full application router over fresh in-memory storage.
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let jobs = Arc::new(InMemoryJobQueue::new());
    let store = ScriptStore::new(Arc::new(InMemoryScriptRepository::new()), jobs.clone());
    let event_bus = Arc::new(EventBus::default());

    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };

    TestApp {
        router: build_app_router(state, &config),
        jobs,
        event_bus,
    }
}

/// Mint a valid access token for `user_id` under the test secret.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("router should be infallible")
}

/// Unauthenticated GET.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    post_raw_auth(app, uri, body.to_string(), token).await
}

/// POST with a raw body, for empty and malformed payloads.
pub async fn post_raw_auth(
    app: &Router,
    uri: &str,
    body: impl Into<String>,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Register a script and assert it was created.
pub async fn create_script(app: &Router, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(app, "/script", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
