use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user {0} not found")]
    NotFound(i64),

    #[error("user '{0}' not found")]
    UsernameNotFound(String),

    #[error("username '{0}' already exists")]
    DuplicateUsername(String),

    #[error("invalid password")]
    InvalidPassword,

    #[error("{0}")]
    Validation(String),

    #[error("password hashing error: {0}")]
    PasswordHash(String),

    #[error("token error: {0}")]
    Token(String),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::UsernameNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            UserError::DuplicateUsername(_) => AppError::Conflict(err.to_string()),
            UserError::InvalidPassword => AppError::BadRequest(err.to_string()),
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::Database(e) => AppError::Database(e),
            UserError::PasswordHash(_) | UserError::Token(_) | UserError::Internal(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_user_error_status_mapping() {
        let cases = [
            (UserError::NotFound(1), StatusCode::NOT_FOUND),
            (UserError::UsernameNotFound("ghost".into()), StatusCode::NOT_FOUND),
            (UserError::DuplicateUsername("alice".into()), StatusCode::CONFLICT),
            (UserError::InvalidPassword, StatusCode::BAD_REQUEST),
            (UserError::PasswordHash("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }
}
