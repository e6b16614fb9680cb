use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("bank account {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type BankResult<T> = Result<T, BankError>;

/// Convert BankError to AppError for standardized error responses
impl From<BankError> for AppError {
    fn from(err: BankError) -> Self {
        match err {
            BankError::NotFound(_) => AppError::NotFound(err.to_string()),
            BankError::Validation(msg) => AppError::BadRequest(msg),
            BankError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for BankError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
