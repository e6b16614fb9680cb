use argon2::{
    PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use axum_helpers::{AppError, CurrentUser, JwtAuth, UserLoader};
use observability::{Outcome, ShopMetrics};
use std::sync::Arc;
use validator::Validate;

use crate::config::PasswordConfig;
use crate::error::{UserError, UserResult};
use crate::models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User, UserResponse};
use crate::repository::UserRepository;

/// Service layer for registration, login and user lookup
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
    password: PasswordConfig,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: JwtAuth, password: PasswordConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
            password,
        }
    }

    /// Register a new user and issue a token for them
    pub async fn register(&self, input: RegisterRequest) -> UserResult<AuthResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self
            .repository
            .get_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let password_hash = self.hash_password(input.password).await?;

        let user = self
            .repository
            .create(NewUser {
                username: input.username,
                name: input.name,
                password_hash,
            })
            .await?;

        ShopMetrics::user_registered();
        self.auth_response(user)
    }

    /// Verify credentials and issue a token
    pub async fn login(&self, input: LoginRequest) -> UserResult<AuthResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let Some(user) = self.repository.get_by_username(&input.username).await? else {
            ShopMetrics::login(Outcome::Rejected);
            return Err(UserError::UsernameNotFound(input.username));
        };

        if !self
            .verify_password(input.password, user.password_hash.clone())
            .await?
        {
            tracing::info!(user_id = user.id, "Login rejected: wrong password");
            ShopMetrics::login(Outcome::Rejected);
            return Err(UserError::InvalidPassword);
        }

        ShopMetrics::login(Outcome::Success);
        self.auth_response(user)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i64) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    fn auth_response(&self, user: User) -> UserResult<AuthResponse> {
        let access_token = self
            .jwt
            .issue_token(user.id)
            .map_err(|e| UserError::Token(e.to_string()))?;

        Ok(AuthResponse {
            username: user.username,
            name: user.name,
            access_token,
        })
    }

    /// Argon2 is CPU bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> UserResult<String> {
        let config = self.password;

        tokio::task::spawn_blocking(move || {
            let hasher = config
                .hasher()
                .map_err(|e| UserError::PasswordHash(e.to_string()))?;
            let salt = SaltString::generate(&mut OsRng);

            hasher
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| UserError::PasswordHash(e.to_string()))
        })
        .await
        .map_err(|e| UserError::Internal(e.to_string()))?
    }

    async fn verify_password(&self, password: String, hash: String) -> UserResult<bool> {
        let config = self.password;

        tokio::task::spawn_blocking(move || {
            let parsed_hash =
                PasswordHash::new(&hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;
            let verifier = config
                .hasher()
                .map_err(|e| UserError::PasswordHash(e.to_string()))?;

            Ok(verifier
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok())
        })
        .await
        .map_err(|e| UserError::Internal(e.to_string()))?
    }
}

#[async_trait]
impl<R: UserRepository + 'static> UserLoader for UserService<R> {
    async fn load_user(&self, user_id: i64) -> Result<Option<CurrentUser>, AppError> {
        Ok(self.repository.get_by_id(user_id).await?.map(Into::into))
    }
}
