use axum::Router;
use axum_helpers::AuthState;
use domain_banks::{BankService, PgBankRepository, handlers};

pub fn router(service: BankService<PgBankRepository>, auth: AuthState) -> Router {
    handlers::router(service, auth)
}
