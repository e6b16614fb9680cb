//! Numeric `{id}` path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extracts a positive integer id from the single path parameter.
///
/// Anything that is not a positive `i64` is rejected with 400 before the
/// handler runs.
///
/// ```ignore
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("product {id}")
/// }
///
/// let app = Router::new().route("/product/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(IdPath(id)),
            _ => Err(AppError::BadRequest(format!("invalid id: {raw}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    async fn status(uri: &str) -> StatusCode {
        Router::new()
            .route("/items/{id}", get(|IdPath(id): IdPath| async move { id.to_string() }))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_accepts_positive_ids() {
        assert_eq!(status("/items/42").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_non_numeric_zero_and_negative() {
        for uri in ["/items/abc", "/items/0", "/items/-3", "/items/1.5"] {
            assert_eq!(status(uri).await, StatusCode::BAD_REQUEST, "{uri}");
        }
    }
}
