use super::jwt::JwtAuth;
use crate::errors::AppError;
use async_trait::async_trait;
use axum::{
    extract::{Query, Request, State},
    http::{HeaderMap, Uri, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Name of the query parameter and cookie that may carry the token
pub const TOKEN_PARAM: &str = "jwt";

/// The authenticated caller, inserted into request extensions by
/// [`require_auth`] and [`optional_auth`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub name: String,
}

/// Resolves a token subject to a user.
///
/// `Ok(None)` means the user no longer exists.
#[async_trait]
pub trait UserLoader: Send + Sync {
    async fn load_user(&self, user_id: i64) -> Result<Option<CurrentUser>, AppError>;
}

/// State shared by the authentication middleware
#[derive(Clone)]
pub struct AuthState {
    jwt: JwtAuth,
    users: Arc<dyn UserLoader>,
}

impl AuthState {
    pub fn new(jwt: JwtAuth, users: Arc<dyn UserLoader>) -> Self {
        Self { jwt, users }
    }

    async fn authenticate(&self, token: &str) -> Result<CurrentUser, AppError> {
        let claims = self.jwt.verify_token(token).map_err(|e| {
            tracing::debug!("JWT verification failed: {}", e);
            AppError::Forbidden("invalid or expired token".to_string())
        })?;

        let user_id = claims
            .user_id()
            .ok_or_else(|| AppError::Forbidden("invalid token subject".to_string()))?;

        self.users.load_user(user_id).await?.ok_or_else(|| {
            tracing::debug!(user_id, "Token refers to a missing user");
            AppError::Forbidden("invalid or expired token".to_string())
        })
    }
}

#[derive(Deserialize)]
struct TokenQuery {
    jwt: Option<String>,
}

/// Finds a token in, by precedence: the `jwt` query parameter, an
/// `Authorization: Bearer` header (scheme is case-insensitive), the `jwt`
/// cookie.
pub fn extract_token(uri: &Uri, headers: &HeaderMap) -> Option<String> {
    let from_query = Query::<TokenQuery>::try_from_uri(uri)
        .ok()
        .and_then(|Query(q)| q.jwt)
        .filter(|t| !t.is_empty());

    from_query
        .or_else(|| bearer_token(headers))
        .or_else(|| {
            CookieJar::from_headers(headers)
                .get(TOKEN_PARAM)
                .map(|c| c.value().to_string())
                .filter(|t| !t.is_empty())
        })
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

/// Rejects requests without a token (401) or with a bad one (403).
///
/// ```ignore
/// let routes = Router::new()
///     .route("/", post(create_product))
///     .route_layer(middleware::from_fn_with_state(auth, require_auth));
/// ```
pub async fn require_auth(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_token(request.uri(), request.headers()) else {
        tracing::debug!("No JWT found in query, Authorization header or cookie");
        return Err(AppError::Unauthorized("authentication required".to_string()));
    };

    let user = auth.authenticate(&token).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Like [`require_auth`], but lets anonymous requests through.
///
/// A token that is present and invalid is still rejected with 403.
pub async fn optional_auth(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = extract_token(request.uri(), request.headers()) {
        let user = auth.authenticate(&token).await?;
        request.extensions_mut().insert(user);
    }

    Ok(next.run(request).await)
}
