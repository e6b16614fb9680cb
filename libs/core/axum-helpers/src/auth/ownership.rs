use super::middleware::CurrentUser;
use crate::{errors::AppError, extractors::IdPath};
use async_trait::async_trait;
use axum::{
    Extension,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// A resource type whose rows belong to a single user.
#[async_trait]
pub trait ResourceOwner: Send + Sync {
    /// Owning user id of the row, `Ok(None)` when it does not exist
    async fn owner_of(&self, id: i64) -> Result<Option<i64>, AppError>;

    /// Used in error messages, e.g. "product"
    fn resource_name(&self) -> &'static str;
}

/// Lets the request through only when the authenticated user owns the
/// resource named by the `{id}` path segment.
///
/// Must run after [`super::require_auth`]: add it with `route_layer` before
/// the auth layer so auth ends up outermost.
pub async fn require_owner(
    State(resource): State<Arc<dyn ResourceOwner>>,
    IdPath(id): IdPath,
    user: Option<Extension<CurrentUser>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(Extension(user)) = user else {
        return Err(AppError::Unauthorized("authentication required".to_string()));
    };

    let name = resource.resource_name();
    let owner = resource
        .owner_of(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{name} {id} not found")))?;

    if owner != user.id {
        tracing::info!(user_id = user.id, resource = name, resource_id = id, "Ownership check failed");
        return Err(AppError::Forbidden(format!("you do not own this {name}")));
    }

    Ok(next.run(request).await)
}
