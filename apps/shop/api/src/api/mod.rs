use axum::{Router, middleware, routing::get};
use axum_helpers::{AuthState, JwtAuth};
use domain_banks::{BankService, PgBankRepository};
use domain_users::{PgUserRepository, UserService};
use std::sync::Arc;

use crate::state::AppState;

pub mod banks;
pub mod health;
pub mod images;
pub mod products;
pub mod users;

/// Creates the API routes without the `/v1` prefix.
/// The `/v1` prefix will be added by the `create_router` helper.
///
/// Builds every service once; the user service doubles as the token's user
/// loader, and the user and bank services back the product domain's seller
/// lookups.
pub fn routes(state: &AppState) -> Router {
    let jwt = JwtAuth::new(&state.config.jwt);

    let user_service = UserService::new(
        PgUserRepository::new(state.db.clone()),
        jwt.clone(),
        state.config.password,
    );
    let bank_service = BankService::new(PgBankRepository::new(state.db.clone()));
    let auth = AuthState::new(jwt, Arc::new(user_service.clone()));

    Router::new()
        .nest("/user", users::router(user_service.clone()))
        .nest(
            "/product",
            products::router(state, user_service, bank_service.clone(), auth.clone()),
        )
        .nest("/bank", banks::router(bank_service, auth.clone()))
        .nest("/image", images::router(state, auth))
        .layer(middleware::from_fn(observability::metrics_middleware))
}

/// Routes served outside `/v1`: readiness probe and Prometheus scrape.
pub fn ops_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
        .route("/metrics", get(observability::metrics_handler))
}
