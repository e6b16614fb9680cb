//! Success envelope: `{"data": ..., "message": "...", "metadata": {...}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::{IntoParams, ToSchema};

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageMeta {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Wraps handler output in the standard envelope.
///
/// `message` defaults to the lowercased reason phrase of the status, so a 201
/// reads `"created"`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMeta>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            data,
            message: default_message(status),
            metadata: None,
            status,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }

    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, data)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_metadata(mut self, metadata: PageMeta) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_lowercase)
        .unwrap_or_else(|| status.as_str().to_string())
}

/// `limit`/`offset` query parameters with the API's defaults applied.
#[derive(Debug, Clone, Copy, Default, serde::Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Page size; values <= 0 fall back to 10
    pub limit: Option<i64>,
    /// Rows to skip; negative values count as 0
    pub offset: Option<i64>,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u64 = 10;

    pub fn limit(&self) -> u64 {
        match self.limit {
            Some(limit) if limit > 0 => limit as u64,
            _ => Self::DEFAULT_LIMIT,
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0).max(0) as u64
    }

    pub fn meta(&self, total: u64) -> PageMeta {
        PageMeta {
            total,
            limit: self.limit(),
            offset: self.offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_message_follows_status() {
        assert_eq!(ApiResponse::ok(1).message, "ok");
        assert_eq!(ApiResponse::created(1).message, "created");
        assert_eq!(ApiResponse::ok(1).with_message("bought").message, "bought");
    }

    #[test]
    fn test_metadata_is_omitted_when_absent() {
        let value = serde_json::to_value(ApiResponse::ok(json!({"a": 1}))).unwrap();
        assert_eq!(value, json!({"data": {"a": 1}, "message": "ok"}));

        let page = Pagination { limit: Some(5), offset: Some(10) };
        let value = serde_json::to_value(ApiResponse::ok(1).with_metadata(page.meta(42))).unwrap();
        assert_eq!(value["metadata"], json!({"total": 42, "limit": 5, "offset": 10}));
    }

    #[test]
    fn test_pagination_defaults_and_clamps() {
        let page = Pagination::default();
        assert_eq!((page.limit(), page.offset()), (10, 0));

        let page = Pagination { limit: Some(0), offset: Some(-4) };
        assert_eq!((page.limit(), page.offset()), (10, 0));

        let page = Pagination { limit: Some(-1), offset: Some(3) };
        assert_eq!((page.limit(), page.offset()), (10, 3));
    }

    #[test]
    fn test_into_response_uses_status() {
        let response = ApiResponse::created("x").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
