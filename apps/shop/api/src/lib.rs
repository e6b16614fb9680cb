//! Shop API
//!
//! Wires the user, product, bank account and image domains onto one axum
//! router backed by PostgreSQL.
//!
//! ```text
//! /v1/user     register, login
//! /v1/product  listing, detail, management, purchase
//! /v1/bank     seller bank accounts
//! /v1/image    uploads
//! /health /ready /metrics
//! /images      in-memory uploads, development only
//! ```

pub mod api;
pub mod config;
pub mod openapi;
pub mod sellers;
pub mod state;

pub use config::Config;
pub use state::AppState;

use axum::Router;
use axum_helpers::{create_router, health_router};
use domain_images::handlers::files_router;
use std::io;

/// The complete application: versioned API with docs and shared layers,
/// plus `/health`, `/ready` and `/metrics`. In-memory uploads are served
/// under `/images`.
///
/// Reads `CORS_ALLOWED_ORIGIN` from the environment.
pub async fn build_app(state: &AppState) -> io::Result<Router> {
    let router = create_router::<openapi::ApiDoc>(
        api::routes(state),
        state.config.server.request_timeout,
    )
    .await?;

    let router = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ops_router(state.clone()));

    Ok(match &state.served_images {
        Some(store) => router.nest("/images", files_router(store.clone())),
        None => router,
    })
}
