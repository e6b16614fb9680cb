//! # Axum Helpers
//!
//! Building blocks shared by the shop services.
//!
//! - **[`auth`]**: JWT issuing/verification, `require_auth`/`optional_auth`
//!   middleware, resource ownership checks
//! - **[`server`]**: router assembly with OpenAPI docs, health endpoints,
//!   graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: [`AppError`] and the error envelope
//! - **[`response`]**: the success envelope and pagination
//! - **[`extractors`]**: [`IdPath`] and [`ValidatedJson`]

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

pub use auth::{
    AuthState, CurrentUser, JwtAuth, JwtClaims, JwtConfig, ResourceOwner, UserLoader,
    optional_auth, require_auth, require_owner,
};
pub use errors::{AppError, ErrorResponse};
pub use extractors::{IdPath, ValidatedJson};
pub use response::{ApiResponse, PageMeta, Pagination};
pub use server::{
    API_PREFIX, HealthCheckFuture, create_production_app, create_router, health_router,
    run_health_checks,
};
