//! Reusable OpenAPI responses for the error statuses every route can return.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({"data": null, "message": "internal server error"})
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed body or failed validation",
    content_type = "application/json",
    example = json!({
        "data": null,
        "message": "username: Validation error: length [{\"min\": Number(5), \"max\": Number(15), \"value\": String(\"abc\")}]",
        "details": {
            "username": [{"code": "length", "message": null, "params": {"min": 5, "max": 15, "value": "abc"}}]
        }
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({"data": null, "message": "product 42 not found"})
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - a token is required",
    content_type = "application/json",
    example = json!({"data": null, "message": "authentication required"})
)]
pub struct UnauthorizedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - invalid token or not the owner",
    content_type = "application/json",
    example = json!({"data": null, "message": "you do not own this resource"})
)]
pub struct ForbiddenResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - resource already exists",
    content_type = "application/json",
    example = json!({"data": null, "message": "username already exists"})
)]
pub struct ConflictResponse(pub ErrorResponse);
