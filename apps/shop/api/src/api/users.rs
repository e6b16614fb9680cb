use axum::Router;
use domain_users::{PgUserRepository, UserService, handlers};

pub fn router(service: UserService<PgUserRepository>) -> Router {
    handlers::router(service)
}
