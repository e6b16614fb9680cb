use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error("invalid condition")]
    InvalidCondition(String),

    #[error("insufficient stock")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("purchase count limit reached")]
    PurchaseCountOverflow,

    #[error("product is not purchasable")]
    NotPurchasable,

    #[error("bank account {0} not found")]
    BankAccountNotFound(String),

    #[error("bank account does not belong to the seller")]
    BankAccountMismatch,

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Failure reported by another domain (seller or bank lookup)
    #[error(transparent)]
    Upstream(#[from] AppError),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) | ProductError::BankAccountNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::InvalidCondition(_)
            | ProductError::InsufficientStock { .. }
            | ProductError::NotPurchasable
            | ProductError::PurchaseCountOverflow
            | ProductError::BankAccountMismatch => AppError::BadRequest(err.to_string()),
            ProductError::Database(e) => AppError::Database(e),
            ProductError::Upstream(e) => e,
        }
    }
}

impl IntoResponse for ProductError {
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
    fn test_business_errors_are_client_errors() {
        let cases = [
            (ProductError::NotFound(1), StatusCode::NOT_FOUND),
            (ProductError::BankAccountNotFound("9".into()), StatusCode::NOT_FOUND),
            (ProductError::InvalidCondition("used".into()), StatusCode::BAD_REQUEST),
            (ProductError::PurchaseCountOverflow, StatusCode::BAD_REQUEST),
            (
                ProductError::InsufficientStock {
                    available: 1,
                    requested: 2,
                },
                StatusCode::BAD_REQUEST,
            ),
            (ProductError::NotPurchasable, StatusCode::BAD_REQUEST),
            (ProductError::BankAccountMismatch, StatusCode::BAD_REQUEST),
            (
                ProductError::Upstream(AppError::Forbidden("nope".into())),
                StatusCode::FORBIDDEN,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_insufficient_stock_message() {
        let err = ProductError::InsufficientStock {
            available: 3,
            requested: 5,
        };
        assert_eq!(err.to_string(), "insufficient stock");
    }
}
