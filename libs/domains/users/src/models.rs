use axum_helpers::CurrentUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User entity - matches SQL schema
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    /// Unique login name
    pub username: String,
    /// Display name
    pub name: String,
    /// Argon2 PHC string (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row to insert; the password is already hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub password_hash: String,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
        }
    }
}

/// DTO for user registration
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 5, max = 15))]
    #[schema(min_length = 5, max_length = 15, example = "johndoe")]
    pub username: String,
    #[validate(length(min = 5, max = 50))]
    #[schema(min_length = 5, max_length = 50, example = "John Doe")]
    pub name: String,
    #[validate(length(min = 5, max = 15))]
    #[schema(min_length = 5, max_length = 15)]
    pub password: String,
}

/// DTO for user login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 5, max = 15))]
    #[schema(min_length = 5, max_length = 15, example = "johndoe")]
    pub username: String,
    #[validate(length(min = 5, max = 15))]
    #[schema(min_length = 5, max_length = 15)]
    pub password: String,
}

/// Returned by both register and login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub username: String,
    pub name: String,
    /// HS256 JWT, send back as `Authorization: Bearer <token>`
    pub access_token: String,
}
