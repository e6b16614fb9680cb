//! Handler tests for Users domain
//!
//! These tests exercise the users router in isolation with the in-memory
//! repository: request validation, status codes and the response envelope.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use axum_helpers::{JwtAuth, JwtConfig};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

const SECRET: &str = "handler-test-secret-with-enough-chars";

fn app() -> Router {
    let jwt = JwtAuth::new(&JwtConfig::new(SECRET, 30).unwrap());
    let service = UserService::new(
        InMemoryUserRepository::new(),
        jwt,
        PasswordConfig::new(1).unwrap(),
    );
    handlers::router(service)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_register_returns_201_with_token() {
    let response = app()
        .oneshot(post_json(
            "/register",
            json!({"username": "alice", "name": "Alice Smith", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "created");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["name"], "Alice Smith");
    assert!(body["data"]["accessToken"].as_str().unwrap().len() > 20);

    let jwt = JwtAuth::new(&JwtConfig::new(SECRET, 30).unwrap());
    let claims = jwt
        .verify_token(body["data"]["accessToken"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.user_id(), Some(1));
}

#[tokio::test]
async fn test_register_validates_lengths() {
    let response = app()
        .oneshot(post_json(
            "/register",
            json!({"username": "al", "name": "Alice Smith", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert!(body["data"].is_null());
    assert!(body["details"]["username"].is_array());
}

#[tokio::test]
async fn test_register_rejects_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_returns_409() {
    let app = app();
    let body = json!({"username": "alice", "name": "Alice Smith", "password": "secret1"});

    let first = app
        .clone()
        .oneshot(post_json("/register", body.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.oneshot(post_json("/register", body)).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_flow() {
    let app = app();
    app.clone()
        .oneshot(post_json(
            "/register",
            json!({"username": "alice", "name": "Alice Smith", "password": "secret1"}),
        ))
        .await
        .unwrap();

    let ok = app
        .clone()
        .oneshot(post_json(
            "/login",
            json!({"username": "alice", "password": "secret1"}),
        ))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let body = json_body(ok.into_body()).await;
    assert_eq!(body["message"], "ok");
    assert_eq!(body["data"]["username"], "alice");

    let wrong = app
        .clone()
        .oneshot(post_json(
            "/login",
            json!({"username": "alice", "password": "wrongpw"}),
        ))
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::BAD_REQUEST);
    let body = json_body(wrong.into_body()).await;
    assert_eq!(body["message"], "invalid password");

    let unknown = app
        .oneshot(post_json(
            "/login",
            json!({"username": "nobody", "password": "secret1"}),
        ))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}
