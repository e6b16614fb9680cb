//! Application state management.
//!
//! The state is built once in `main` and handed to [`crate::api::routes`],
//! which creates the domain services from it.

use domain_images::{ImageStore, InMemoryImageStore};
use std::sync::Arc;

/// Shared application state.
///
/// Cloning is cheap: the connection pool and the image store are both
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    /// S3 in production, in-memory in development and tests
    pub images: Arc<dyn ImageStore>,
    /// Set when `images` keeps uploads in memory; served under `/images`
    pub served_images: Option<InMemoryImageStore>,
}
