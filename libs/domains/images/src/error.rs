use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("missing form field `file`")]
    MissingFile,

    #[error("file is empty")]
    Empty,

    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("image is larger than {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("invalid multipart body: {0}")]
    Multipart(String),

    #[error("image {0} not found")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),
}

pub type ImageResult<T> = Result<T, ImageError>;

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::Storage(e) => {
                tracing::error!(error = %e, "Image store failed");
                AppError::InternalServerError("failed to store image".to_string())
            }
            ImageError::NotFound(_) => AppError::NotFound(err.to_string()),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for ImageError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
