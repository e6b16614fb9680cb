use axum::{
    Extension, Router,
    extract::State,
    middleware,
    routing::{patch, post},
};
use axum_helpers::{
    ApiResponse, AuthState, CurrentUser, IdPath, ResourceOwner, ValidatedJson,
    errors::responses::{
        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    require_auth, require_owner,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::BankResult;
use crate::models::{BankAccountInput, BankAccountResponse};
use crate::repository::BankRepository;
use crate::service::BankService;

pub const TAG: &str = "bank";

/// OpenAPI documentation for the bank account endpoints
#[derive(OpenApi)]
#[openapi(
    paths(create_account, list_accounts, update_account, delete_account),
    components(
        schemas(BankAccountInput, BankAccountResponse),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Seller bank accounts")
    )
)]
pub struct ApiDoc;

/// Create the bank router, meant to be nested under `/bank`
///
/// Every route requires a token; `PATCH` and `DELETE` additionally require
/// the caller to own the account.
pub fn router<R: BankRepository + 'static>(service: BankService<R>, auth: AuthState) -> Router {
    let shared_service = Arc::new(service);
    let owner: Arc<dyn ResourceOwner> = shared_service.clone();

    let authed = Router::new()
        .route("/account", post(create_account).get(list_accounts))
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_auth));

    let owned = Router::new()
        .route("/account/{id}", patch(update_account).delete(delete_account))
        .route_layer(middleware::from_fn_with_state(owner, require_owner))
        .route_layer(middleware::from_fn_with_state(auth, require_auth));

    authed.merge(owned).with_state(shared_service)
}

/// Add a bank account for the current user
#[utoipa::path(
    post,
    path = "/account",
    tag = TAG,
    request_body = BankAccountInput,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Bank account created", body = ApiResponse<BankAccountResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_account<R: BankRepository>(
    State(service): State<Arc<BankService<R>>>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(input): ValidatedJson<BankAccountInput>,
) -> BankResult<ApiResponse<BankAccountResponse>> {
    let account = service.create_account(user.id, input).await?;
    Ok(ApiResponse::created(account))
}

/// List the current user's bank accounts
#[utoipa::path(
    get,
    path = "/account",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bank accounts of the caller", body = ApiResponse<Vec<BankAccountResponse>>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_accounts<R: BankRepository>(
    State(service): State<Arc<BankService<R>>>,
    Extension(user): Extension<CurrentUser>,
) -> BankResult<ApiResponse<Vec<BankAccountResponse>>> {
    let accounts = service.list_accounts(user.id).await?;
    Ok(ApiResponse::ok(accounts))
}

/// Replace a bank account's details
#[utoipa::path(
    patch,
    path = "/account/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Bank account id")),
    request_body = BankAccountInput,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bank account updated", body = ApiResponse<BankAccountResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_account<R: BankRepository>(
    State(service): State<Arc<BankService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<BankAccountInput>,
) -> BankResult<ApiResponse<BankAccountResponse>> {
    let account = service.update_account(id, input).await?;
    Ok(ApiResponse::ok(account))
}

/// Delete a bank account
#[utoipa::path(
    delete,
    path = "/account/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Bank account id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bank account deleted", body = ApiResponse<BankAccountResponse>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_account<R: BankRepository>(
    State(service): State<Arc<BankService<R>>>,
    IdPath(id): IdPath,
) -> BankResult<ApiResponse<BankAccountResponse>> {
    let account = service.delete_account(id).await?;
    Ok(ApiResponse::ok(account))
}
