use axum::{
    Extension, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State, multipart::MultipartRejection},
    http::header,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, AuthState, CurrentUser,
    errors::responses::{
        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
    require_auth,
};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::{ImageError, ImageResult};
use crate::provider::InMemoryImageStore;
use crate::service::{ImageService, ImageUploaded};

pub const TAG: &str = "image";

/// Room for multipart boundaries and headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Multipart form accepted by the upload endpoint
#[derive(ToSchema)]
pub struct ImageUploadForm {
    /// JPEG or PNG image
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// OpenAPI documentation for the image endpoints
#[derive(OpenApi)]
#[openapi(
    paths(upload_image),
    components(
        schemas(ImageUploadForm, ImageUploaded),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Image uploads")
    )
)]
pub struct ApiDoc;

/// Create the image router, meant to be nested under `/image`
pub fn router(service: ImageService, auth: AuthState) -> Router {
    let body_limit = service.max_bytes() + MULTIPART_OVERHEAD;

    Router::new()
        .route("/", post(upload_image))
        .route_layer(middleware::from_fn_with_state(auth, require_auth))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(Arc::new(service))
}

/// Upload an image and get its public URL
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Image stored", body = ApiResponse<ImageUploaded>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_image(
    State(service): State<Arc<ImageService>>,
    Extension(user): Extension<CurrentUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ImageResult<ApiResponse<ImageUploaded>> {
    let mut multipart = multipart.map_err(|e| ImageError::Multipart(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ImageError::Multipart(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let body = field
            .bytes()
            .await
            .map_err(|e| ImageError::Multipart(e.body_text()))?;

        tracing::debug!(user_id = user.id, size = body.len(), "Image upload received");
        let uploaded = service.upload(content_type.as_deref(), body).await?;
        return Ok(ApiResponse::created(uploaded));
    }

    Err(ImageError::MissingFile)
}

/// Serves uploads kept by an [`InMemoryImageStore`] at `GET /{key}`.
///
/// Mount it where the store's base URL points, `/images` by default.
pub fn files_router(store: InMemoryImageStore) -> Router {
    Router::new()
        .route("/{key}", get(serve_image))
        .with_state(store)
}

async fn serve_image(
    State(store): State<InMemoryImageStore>,
    Path(key): Path<String>,
) -> ImageResult<Response> {
    let (content_type, body) = store.get(&key).await.ok_or(ImageError::NotFound(key))?;
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}
