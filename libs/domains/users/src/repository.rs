use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a taken username yields `DuplicateUsername`
    async fn create(&self, input: NewUser) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Get a user by username (exact match)
    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    users: HashMap<i64, User>,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        if store.users.values().any(|u| u.username == input.username) {
            return Err(UserError::DuplicateUsername(input.username));
        }

        store.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: store.next_id,
            username: input.username,
            name: input.name,
            password_hash: input.password_hash,
            created_at: now,
            updated_at: now,
        };
        store.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, username = %user.username, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}
