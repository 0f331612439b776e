#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use chrono::Utc;
use common_auth::{TokenCodec, TokenConfig};
use http_body_util::BodyExt;
use lyrics_service::store::UserRecord;
use lyrics_service::AppState;
use serde_json::Value;
use tower::util::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_state() -> AppState {
    let codec = Arc::new(TokenCodec::new(TEST_SECRET, TokenConfig::new()));
    AppState::new(codec)
}

pub fn seed_user(state: &AppState, email: &str, username: &str, password: &str, role: &str) -> Uuid {
    let id = Uuid::new_v4();
    let password_hash = common_auth::password::hash(password).expect("hash password");
    state
        .users
        .insert(UserRecord {
            id,
            email: email.to_string(),
            username: username.to_string(),
            password_hash,
            role: role.to_string(),
            created_at: Utc::now(),
        })
        .expect("seed user");
    id
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<axum::body::Body> {
    router.clone().oneshot(request).await.expect("infallible")
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request")
}

pub fn get_with_bearer(path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request")
}

pub fn head_with_bearer(path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("HEAD")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request")
}

pub fn delete_with_bearer(path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request")
}

pub fn post_json(path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn post_json_with_bearer(path: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub async fn body_json(response: Response<axum::body::Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
