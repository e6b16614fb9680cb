//! Handler tests for Images domain
//!
//! Sends hand-built multipart bodies through the upload router backed by the
//! in-memory store.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use axum_helpers::{AppError, AuthState, CurrentUser, JwtAuth, JwtConfig, UserLoader};
use domain_images::*;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

const BOUNDARY: &str = "shop-test-boundary";

struct AnyUser;

#[async_trait]
impl UserLoader for AnyUser {
    async fn load_user(&self, user_id: i64) -> Result<Option<CurrentUser>, AppError> {
        Ok(Some(CurrentUser {
            id: user_id,
            username: format!("user{user_id}"),
            name: format!("User {user_id}"),
        }))
    }
}

fn jwt() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new("image-handler-secret-long-enough-12", 30).unwrap())
}

fn app(store: InMemoryImageStore, max_bytes: usize) -> Router {
    let auth = AuthState::new(jwt(), Arc::new(AnyUser));
    let service = ImageService::new(Arc::new(store), ImageConfig { max_bytes });
    handlers::router(service, auth)
}

fn multipart(field: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"upload\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload(body: Vec<u8>, authenticated: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"));
    if authenticated {
        let token = jwt().issue_token(1).unwrap();
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_upload_png() {
    let store = InMemoryImageStore::new("https://cdn.example.com");
    let response = app(store.clone(), 1024)
        .oneshot(upload(multipart("file", "image/png", b"\x89PNG fake"), true))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    let url = body["data"]["imageUrl"].as_str().unwrap();
    assert!(url.starts_with("https://cdn.example.com/"));
    assert!(url.ends_with(".png"));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_upload_requires_token() {
    let response = app(InMemoryImageStore::default(), 1024)
        .oneshot(upload(multipart("file", "image/png", b"png"), false))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_rejects_unsupported_type() {
    let response = app(InMemoryImageStore::default(), 1024)
        .oneshot(upload(multipart("file", "image/gif", b"GIF89a"), true))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "unsupported image type: image/gif");
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let response = app(InMemoryImageStore::default(), 8)
        .oneshot(upload(multipart("file", "image/jpeg", &[0u8; 16]), true))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let response = app(InMemoryImageStore::default(), 1024)
        .oneshot(upload(multipart("picture", "image/png", b"png"), true))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "missing form field `file`");
}

#[tokio::test]
async fn test_uploaded_image_is_served_back() {
    let store = InMemoryImageStore::new("http://localhost:8080/images");
    let response = app(store.clone(), 1024)
        .oneshot(upload(multipart("file", "image/png", b"\x89PNG fake"), true))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    let url = body["data"]["imageUrl"].as_str().unwrap();
    let key = url.rsplit('/').next().unwrap();

    let files = handlers::files_router(store);
    let response = files
        .clone()
        .oneshot(Request::get(format!("/{key}")).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"\x89PNG fake");

    let response = files
        .oneshot(Request::get("/missing.png").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
