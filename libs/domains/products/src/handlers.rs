use axum::{
    Extension, Router,
    extract::State,
    middleware,
    routing::{get, patch, post},
};
use axum_extra::extract::{Query, QueryRejection};
use axum_helpers::{
    ApiResponse, AuthState, CurrentUser, IdPath, ResourceOwner, ValidatedJson,
    errors::responses::{
        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    optional_auth, require_auth, require_owner,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, ProductCondition, ProductDetail, ProductFilter, ProductList, ProductResponse,
    PurchaseRequest, SellerDetail, SortBy, SortOrder, UpdateProduct, UpdateStock,
};
use crate::repository::ProductRepository;
use crate::seller::SellerBankAccount;
use crate::service::ProductService;

pub const TAG: &str = "product";

/// OpenAPI documentation for the product endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        create_product,
        list_products,
        get_product,
        update_product,
        delete_product,
        update_stock,
        purchase_product
    ),
    components(
        schemas(
            CreateProduct,
            UpdateProduct,
            UpdateStock,
            PurchaseRequest,
            ProductResponse,
            ProductList,
            ProductDetail,
            SellerDetail,
            SellerBankAccount,
            ProductCondition,
            SortBy,
            SortOrder
        ),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product listing, management and purchase")
    )
)]
pub struct ApiDoc;

/// Create the product router, meant to be nested under `/product`
///
/// Reads are public but pick up the caller when a token is sent. Creating and
/// buying need a token; edits need the caller to own the product.
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    auth: AuthState,
) -> Router {
    let shared_service = Arc::new(service);
    let owner: Arc<dyn ResourceOwner> = shared_service.clone();

    let public = Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .route_layer(middleware::from_fn_with_state(auth.clone(), optional_auth));

    let authed = Router::new()
        .route("/", post(create_product))
        .route("/{id}/buy", post(purchase_product))
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_auth));

    let owned = Router::new()
        .route("/{id}", patch(update_product).delete(delete_product))
        .route("/{id}/stock", patch(update_stock))
        .route_layer(middleware::from_fn_with_state(owner, require_owner))
        .route_layer(middleware::from_fn_with_state(auth, require_auth));

    public.merge(authed).merge(owned).with_state(shared_service)
}

/// List a product for sale
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<ApiResponse<ProductResponse>> {
    let product = service.create_product(user.id, input).await?;
    Ok(ApiResponse::created(product))
}

/// Search and page through products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProductFilter),
    responses(
        (status = 200, description = "Matching products with paging metadata", body = ApiResponse<ProductList>),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    user: Option<Extension<CurrentUser>>,
    filter: Result<Query<ProductFilter>, QueryRejection>,
) -> ProductResult<ApiResponse<ProductList>> {
    let Query(filter) = filter.map_err(|e| ProductError::Validation(e.to_string()))?;
    let caller = user.map(|Extension(u)| u.id);

    let (products, meta) = service.list_products(filter, caller).await?;
    Ok(ApiResponse::ok(ProductList { products }).with_metadata(meta))
}

/// Product page: the product plus seller details
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product and seller", body = ApiResponse<ProductDetail>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<ApiResponse<ProductDetail>> {
    let detail = service.get_product(id).await?;
    Ok(ApiResponse::ok(detail))
}

/// Replace a product's editable fields
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Product id")),
    request_body = UpdateProduct,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<ApiResponse<ProductResponse>> {
    let product = service.update_product(id, input).await?;
    Ok(ApiResponse::ok(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Product id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<ProductResponse>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<ApiResponse<ProductResponse>> {
    let product = service.delete_product(id).await?;
    Ok(ApiResponse::ok(product))
}

/// Set the stock level
#[utoipa::path(
    patch,
    path = "/{id}/stock",
    tag = TAG,
    params(("id" = i64, Path, description = "Product id")),
    request_body = UpdateStock,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stock updated", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateStock>,
) -> ProductResult<ApiResponse<ProductResponse>> {
    let product = service.update_stock(id, input).await?;
    Ok(ApiResponse::ok(product))
}

/// Buy a product
#[utoipa::path(
    post,
    path = "/{id}/buy",
    tag = TAG,
    params(("id" = i64, Path, description = "Product id")),
    request_body = PurchaseRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Purchase recorded, product after the sale", body = ApiResponse<ProductResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn purchase_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Extension(user): Extension<CurrentUser>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<PurchaseRequest>,
) -> ProductResult<ApiResponse<ProductResponse>> {
    tracing::debug!(product_id = id, buyer_id = user.id, quantity = input.quantity, "Purchase requested");
    let product = service.purchase(id, input).await?;
    Ok(ApiResponse::ok(product))
}
