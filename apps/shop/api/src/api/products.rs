use axum::Router;
use axum_helpers::AuthState;
use domain_banks::{BankService, PgBankRepository};
use domain_products::{PgProductRepository, ProductService, handlers};
use domain_users::{PgUserRepository, UserService};
use std::sync::Arc;

use crate::sellers::DomainSellerLookup;
use crate::state::AppState;

pub fn router(
    state: &AppState,
    users: UserService<PgUserRepository>,
    banks: BankService<PgBankRepository>,
    auth: AuthState,
) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    let sellers = Arc::new(DomainSellerLookup::new(users, banks));
    handlers::router(ProductService::new(repository, sellers), auth)
}
