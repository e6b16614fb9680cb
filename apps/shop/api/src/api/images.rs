use axum::Router;
use axum_helpers::AuthState;
use domain_images::{ImageService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState, auth: AuthState) -> Router {
    let service = ImageService::new(state.images.clone(), state.config.images);
    handlers::router(service, auth)
}
