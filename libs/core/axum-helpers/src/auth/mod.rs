//! Bearer-token authentication and per-resource ownership checks.
//!
//! ```ignore
//! let auth = AuthState::new(JwtAuth::new(&jwt_config), Arc::new(user_service));
//! let owner: Arc<dyn ResourceOwner> = product_service.clone();
//!
//! let owned = Router::new()
//!     .route("/{id}", delete(delete_product))
//!     .route_layer(from_fn_with_state(owner, require_owner))
//!     .route_layer(from_fn_with_state(auth, require_auth));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod ownership;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims};
pub use middleware::{
    AuthState, CurrentUser, TOKEN_PARAM, UserLoader, extract_token, optional_auth, require_auth,
};
pub use ownership::{ResourceOwner, require_owner};
