//! Users Domain
//!
//! Registration, login and user lookup for the shop.
//!
//! # Features
//!
//! - Username/password registration with Argon2id hashing
//! - Login issuing HS256 access tokens
//! - [`axum_helpers::UserLoader`] implementation used by the auth middleware
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Password hashing, token issuing, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{handlers, InMemoryUserRepository, PasswordConfig, UserService};
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("a-secret-of-at-least-thirty-two-chars", 30).unwrap());
//! let service = UserService::new(InMemoryUserRepository::new(), jwt, PasswordConfig::default());
//! let router = handlers::router(service);
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use config::PasswordConfig;
pub use error::{UserError, UserResult};
pub use models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
