//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the full router via `tower::ServiceExt::oneshot` without a
//! TCP listener, using the same middleware stack production uses.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use changerawr_api::auth::jwt::{generate_access_token, JwtConfig};
use changerawr_api::auth::password::hash_password;
use changerawr_api::config::ServerConfig;
use changerawr_api::router::build_app_router;
use changerawr_api::state::AppState;
use changerawr_core::publication::DedupScope;
use changerawr_core::roles::Role;
use changerawr_core::types::DbId;
use changerawr_db::models::user::CreateUser;
use changerawr_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        dedup_scope: DedupScope::PerEntryAndType,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Like [`build_test_app`] but with a caller-supplied config (e.g. a
/// different dedup scope).
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert a user with the given role and return `(user_id, bearer_token)`.
///
/// The password is always `"integration-test-pw"`.
pub async fn seed_user(pool: &PgPool, email: &str, role: Role) -> (DbId, String) {
    let password_hash = hash_password("integration-test-pw").expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            name: format!("{role} user"),
            password_hash,
            role: role.as_str().to_string(),
        },
    )
    .await
    .expect("user insert should succeed");

    let token = generate_access_token(user.id, role, &test_config().jwt)
        .expect("token generation should succeed");
    (user.id, token)
}

/// Send a request with an optional bearer token and optional JSON body.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PATCH", uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, Some(token), None).await
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a project through the API as the given admin; returns its id.
pub async fn seed_project(
    app: &Router,
    admin_token: &str,
    name: &str,
    require_approval: bool,
    allow_auto_publish: bool,
) -> DbId {
    let response = post_json(
        app.clone(),
        "/api/projects",
        admin_token,
        serde_json::json!({
            "name": name,
            "require_approval": require_approval,
            "allow_auto_publish": allow_auto_publish,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a draft entry through the API; returns its id.
pub async fn seed_entry(app: &Router, token: &str, project_id: DbId, title: &str) -> DbId {
    let response = post_json(
        app.clone(),
        &format!("/api/projects/{project_id}/changelog"),
        token,
        serde_json::json!({
            "title": title,
            "content": "Entry body",
            "version": "1.0.0",
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
